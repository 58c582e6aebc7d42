use approx::assert_abs_diff_eq;
use glam::{Mat3, Mat4, Vec3, Vec4};
use webgl_applets::cube::{self, CubeChange, CubeScene, CubeSettings, Projection, ROTATION_STEP};
use webgl_applets::settings::SettingsError;

fn view() -> Mat4 {
    Mat4::look_at_rh(cube::EYE, Vec3::ZERO, Vec3::Y)
}

#[test]
fn settings_default_and_parse() {
    let settings = CubeSettings::default();
    assert_eq!(settings.projection, Projection::Perspective);
    assert!(!settings.animate);

    let settings = CubeSettings::from_json(r#"{"projection": "orthographic"}"#).unwrap();
    assert_eq!(settings.projection, Projection::Orthographic);
    assert!(!settings.animate);

    assert!(matches!(CubeSettings::from_json("{"), Err(SettingsError::Json(_))));
}

#[test]
fn parses_form_fields() {
    assert_eq!(
        CubeChange::parse("projection", "orthographic").unwrap(),
        CubeChange::Projection(Projection::Orthographic)
    );
    assert_eq!(CubeChange::parse("animate", "true").unwrap(), CubeChange::Animate(true));
    assert_eq!(CubeChange::parse("animate", " false").unwrap(), CubeChange::Animate(false));

    assert!(matches!(
        CubeChange::parse("projection", "fisheye"),
        Err(SettingsError::InvalidValue { field, .. }) if field == "projection"
    ));
    assert!(matches!(
        CubeChange::parse("animate", "on"),
        Err(SettingsError::InvalidValue { field, .. }) if field == "animate"
    ));
    assert!(matches!(
        CubeChange::parse("speed", "2"),
        Err(SettingsError::UnknownField(name)) if name == "speed"
    ));
}

#[test]
fn spins_only_while_animating() {
    let mut scene = CubeScene::new(CubeSettings::default());
    assert!(!scene.advance());
    assert_eq!(scene.angle_y(), 0.0);

    scene.apply(CubeChange::Animate(true));
    assert!(scene.settings().animate);
    assert!(scene.advance());
    assert!(scene.advance());
    assert_abs_diff_eq!(scene.angle_y(), 2.0 * ROTATION_STEP, epsilon = 1e-7);

    scene.apply(CubeChange::Animate(false));
    assert!(!scene.advance());
    assert_abs_diff_eq!(scene.angle_y(), 2.0 * ROTATION_STEP, epsilon = 1e-7);
}

#[test]
fn geometry_is_a_unit_cube() {
    let scene = CubeScene::new(CubeSettings::default());
    assert_eq!(scene.vertex_count(), 36);
    assert_eq!(scene.normals().len(), scene.positions().len());
    assert!(scene.positions().iter().all(|&c| c == 0.0 || c == 1.0));
}

#[test]
fn model_spins_about_the_cube_center() {
    let mut scene = CubeScene::new(CubeSettings {
        animate: true,
        ..CubeSettings::default()
    });
    for _ in 0..3 {
        let center = scene.model_matrix().transform_point3(Vec3::splat(0.5));
        assert_abs_diff_eq!(center.length(), 0.0, epsilon = 1e-6);
        scene.advance();
    }

    let corner = scene.model_matrix().transform_point3(Vec3::ZERO);
    assert_abs_diff_eq!(corner.length(), Vec3::splat(0.5).length(), epsilon = 1e-6);
    assert_abs_diff_eq!(corner.y, -0.5, epsilon = 1e-6);
}

#[test]
fn both_projections_keep_the_cube_in_view() {
    let mut scene = CubeScene::new(CubeSettings::default());
    for projection in [Projection::Perspective, Projection::Orthographic] {
        scene.apply(CubeChange::Projection(projection));
        let mvp = scene.mvp(1.5, view());
        assert!(mvp.to_cols_array().iter().all(|v| v.is_finite()));

        for corner in scene.positions().chunks_exact(3) {
            let clip = mvp * Vec4::new(corner[0], corner[1], corner[2], 1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.abs().max_element() <= 1.0, "{:?} clips {:?}", projection, ndc);
        }
    }
}

#[test]
fn normal_matrix_stays_orthonormal() {
    let mut scene = CubeScene::new(CubeSettings {
        animate: true,
        ..CubeSettings::default()
    });
    for _ in 0..10 {
        scene.advance();
    }
    let n = scene.normal_matrix();
    let product = n * n.transpose();
    for (a, b) in product.to_cols_array().iter().zip(Mat3::IDENTITY.to_cols_array()) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-6);
    }
}
