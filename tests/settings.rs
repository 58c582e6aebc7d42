use webgl_applets::settings::{CameraKind, Rebuild, SettingsChange, SettingsError, TerrainSettings};

#[test]
fn defaults_match_the_applet() {
    let settings = TerrainSettings::default();
    assert_eq!(settings.grid_resolution, 64);
    assert_eq!(settings.camera, CameraKind::Trackball);
    assert_eq!(settings.noise.amplitude, 1.0);
    assert_eq!(settings.noise.persistence, 0.5);
}

#[test]
fn parses_form_fields() {
    assert_eq!(
        SettingsChange::parse("grid_resolution", "128").unwrap(),
        SettingsChange::GridResolution(128)
    );
    assert_eq!(
        SettingsChange::parse("persistence", " 0.3 ").unwrap(),
        SettingsChange::Persistence(0.3)
    );
    assert_eq!(
        SettingsChange::parse("camera", "spherical").unwrap(),
        SettingsChange::Camera(CameraKind::Spherical)
    );
}

#[test]
fn rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        SettingsChange::parse("colour", "red"),
        Err(SettingsError::UnknownField(name)) if name == "colour"
    ));
    assert!(matches!(
        SettingsChange::parse("octaves", "many"),
        Err(SettingsError::InvalidValue { field, .. }) if field == "octaves"
    ));
    assert!(SettingsChange::parse("camera", "orbit").is_err());

    let message = SettingsChange::parse("octaves", "2.5").unwrap_err().to_string();
    assert_eq!(message, "invalid value `2.5` for setting `octaves`");
}

#[test]
fn noise_edits_rebuild_the_mesh() {
    let mut settings = TerrainSettings::default();
    assert_eq!(settings.apply(SettingsChange::Amplitude(0.4)), Rebuild::Mesh);
    assert_eq!(settings.apply(SettingsChange::Seed(9)), Rebuild::Mesh);
    assert_eq!(settings.apply(SettingsChange::GridResolution(100)), Rebuild::Mesh);
    assert_eq!(settings.noise.amplitude, 0.4);
    assert_eq!(settings.noise.seed, 9);
    assert_eq!(settings.grid_resolution, 100);
}

#[test]
fn camera_edits_only_swap_the_controller() {
    let mut settings = TerrainSettings::default();
    let before = settings.noise;
    assert_eq!(settings.apply(SettingsChange::Camera(CameraKind::Spherical)), Rebuild::Camera);
    assert_eq!(settings.camera, CameraKind::Spherical);
    assert_eq!(settings.noise, before);
}

#[test]
fn edits_are_clamped_to_widget_ranges() {
    let mut settings = TerrainSettings::default();
    settings.apply(SettingsChange::GridResolution(4));
    settings.apply(SettingsChange::Octaves(20));
    settings.apply(SettingsChange::Scale(0.0));
    settings.apply(SettingsChange::Frequency(f64::NAN));
    assert_eq!(settings.grid_resolution, 32);
    assert_eq!(settings.noise.octaves, 8);
    assert_eq!(settings.noise.scale, 0.1);
    assert_eq!(settings.noise.frequency, 0.0);
}

#[test]
fn generator_is_a_snapshot() {
    let mut settings = TerrainSettings::default();
    settings.apply(SettingsChange::Seed(77));
    let generator = settings.generator();
    let before = generator.sample(0.25, -0.5);

    settings.apply(SettingsChange::Amplitude(0.1));
    settings.apply(SettingsChange::Seed(78));
    assert_eq!(generator.sample(0.25, -0.5), before);
}

#[test]
fn mesh_follows_resolution() {
    let mut settings = TerrainSettings::default();
    settings.apply(SettingsChange::GridResolution(33));
    let mesh = settings.build_mesh();
    assert_eq!(mesh.resolution, 33);
    assert_eq!(mesh.positions.len(), 18 * 32 * 32);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
}

#[test]
fn loads_partial_json() {
    let settings =
        TerrainSettings::from_json(r#"{"grid_resolution": 1000, "camera": "spherical", "noise": {"octaves": 3}}"#)
            .unwrap();
    assert_eq!(settings.grid_resolution, 256);
    assert_eq!(settings.camera, CameraKind::Spherical);
    assert_eq!(settings.noise.octaves, 3);
    assert_eq!(settings.noise.scale, 1.0);

    assert_eq!(TerrainSettings::from_json("{}").unwrap(), TerrainSettings::default());
    assert!(matches!(TerrainSettings::from_json("{"), Err(SettingsError::Json(_))));
}

#[test]
fn load_seeds_from_the_clock_unless_pinned() {
    let settings = TerrainSettings::load(None, || 41).unwrap();
    assert_eq!(settings.noise.seed, 41);
    assert_eq!(settings.grid_resolution, 64);

    let settings = TerrainSettings::load(Some(r#"{"grid_resolution": 1000}"#), || 7).unwrap();
    assert_eq!(settings.noise.seed, 7);
    assert_eq!(settings.grid_resolution, 256);

    let settings = TerrainSettings::load(Some(r#"{"noise": {"seed": 3, "octaves": 0}}"#), || panic!("clock read")).unwrap();
    assert_eq!(settings.noise.seed, 3);
    assert_eq!(settings.noise.octaves, 1);

    assert!(matches!(TerrainSettings::load(Some("[1"), || 0), Err(SettingsError::Json(_))));
}
