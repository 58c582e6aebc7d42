//! Settings for the noise-terrain applet.
//!
//! Form widgets do not write into the settings directly: each edit becomes a
//! [`SettingsChange`] message, and [`TerrainSettings::apply`] reports what the
//! applet has to redo.

use std::ops::RangeInclusive;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::maths::noise::{NoiseConfig, NoiseGenerator};
use crate::surface::SurfaceMesh;

pub const GRID_RESOLUTION: RangeInclusive<usize> = 32..=256;
pub const AMPLITUDE: RangeInclusive<f64> = 0.0..=1.0;
pub const FREQUENCY: RangeInclusive<f64> = 0.0..=10.0;
pub const OCTAVES: RangeInclusive<u32> = 1..=8;
pub const PERSISTENCE: RangeInclusive<f64> = 0.0..=1.0;
pub const SCALE: RangeInclusive<f64> = 0.1..=10.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown setting `{0}`")]
    UnknownField(String),
    #[error("unknown applet `{0}`")]
    UnknownApplet(String),
    #[error("invalid value `{value}` for setting `{field}`")]
    InvalidValue { field: String, value: String },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraKind {
    #[default]
    Trackball,
    Spherical,
}

impl FromStr for CameraKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trackball" => Ok(CameraKind::Trackball),
            "spherical" => Ok(CameraKind::Spherical),
            _ => Err(()),
        }
    }
}

/// One edit coming from a settings widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    GridResolution(usize),
    Amplitude(f64),
    Frequency(f64),
    Octaves(u32),
    Persistence(f64),
    Scale(f64),
    Seed(u32),
    Camera(CameraKind),
}

impl SettingsChange {
    /// Maps a form field `name` and its raw `value` to a change.
    pub fn parse(name: &str, value: &str) -> Result<Self, SettingsError> {
        fn num<T: FromStr>(name: &str, value: &str) -> Result<T, SettingsError> {
            value.trim().parse().map_err(|_| SettingsError::InvalidValue {
                field: name.to_string(),
                value: value.to_string(),
            })
        }

        let change = match name {
            "grid_resolution" => SettingsChange::GridResolution(num(name, value)?),
            "amplitude" => SettingsChange::Amplitude(num(name, value)?),
            "frequency" => SettingsChange::Frequency(num(name, value)?),
            "octaves" => SettingsChange::Octaves(num(name, value)?),
            "persistence" => SettingsChange::Persistence(num(name, value)?),
            "scale" => SettingsChange::Scale(num(name, value)?),
            "seed" => SettingsChange::Seed(num(name, value)?),
            "camera" => SettingsChange::Camera(num(name, value)?),
            _ => return Err(SettingsError::UnknownField(name.to_string())),
        };
        Ok(change)
    }
}

/// What the applet must redo after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebuild {
    Mesh,
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub grid_resolution: usize,
    pub camera: CameraKind,
    pub noise: NoiseConfig,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            grid_resolution: 64,
            camera: CameraKind::Trackball,
            noise: NoiseConfig::default(),
        }
    }
}

impl TerrainSettings {
    /// Parses page-supplied JSON; missing fields keep their defaults and
    /// numeric fields are clamped to the widget ranges.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: TerrainSettings = serde_json::from_str(json)?;
        Ok(settings.bounded())
    }

    /// Page settings for a fresh applet. A missing `noise.seed` (or missing
    /// JSON altogether) takes its seed from `clock_seed`, so each load shows
    /// new terrain unless the page pins one.
    pub fn load(json: Option<&str>, clock_seed: impl FnOnce() -> u32) -> Result<Self, SettingsError> {
        let Some(json) = json else {
            let mut settings = Self::default();
            settings.noise.seed = clock_seed();
            return Ok(settings);
        };

        let value: serde_json::Value = serde_json::from_str(json)?;
        let has_seed = value.pointer("/noise/seed").is_some();
        let mut settings = serde_json::from_value::<TerrainSettings>(value)?.bounded();
        if !has_seed {
            settings.noise.seed = clock_seed();
        }
        Ok(settings)
    }

    pub fn bounded(self) -> Self {
        let noise = NoiseConfig {
            amplitude: clamp(self.noise.amplitude, &AMPLITUDE),
            frequency: clamp(self.noise.frequency, &FREQUENCY),
            octaves: clamp(self.noise.octaves, &OCTAVES),
            persistence: clamp(self.noise.persistence, &PERSISTENCE),
            scale: clamp(self.noise.scale, &SCALE),
            seed: self.noise.seed,
        };
        Self {
            grid_resolution: clamp(self.grid_resolution, &GRID_RESOLUTION),
            camera: self.camera,
            noise,
        }
    }

    pub fn apply(&mut self, change: SettingsChange) -> Rebuild {
        debug!("applying {:?}", change);
        match change {
            SettingsChange::GridResolution(v) => self.grid_resolution = clamp(v, &GRID_RESOLUTION),
            SettingsChange::Amplitude(v) => self.noise.amplitude = clamp(v, &AMPLITUDE),
            SettingsChange::Frequency(v) => self.noise.frequency = clamp(v, &FREQUENCY),
            SettingsChange::Octaves(v) => self.noise.octaves = clamp(v, &OCTAVES),
            SettingsChange::Persistence(v) => self.noise.persistence = clamp(v, &PERSISTENCE),
            SettingsChange::Scale(v) => self.noise.scale = clamp(v, &SCALE),
            SettingsChange::Seed(v) => self.noise.seed = v,
            SettingsChange::Camera(kind) => {
                self.camera = kind;
                return Rebuild::Camera;
            }
        }
        Rebuild::Mesh
    }

    /// A generator over a snapshot of the current noise settings.
    pub fn generator(&self) -> NoiseGenerator {
        NoiseGenerator::new(&self.noise)
    }

    pub fn build_mesh(&self) -> SurfaceMesh {
        SurfaceMesh::build(self.grid_resolution, &self.generator())
    }
}

/// NaN falls to the lower bound.
fn clamp<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value > *range.end() {
        *range.end()
    } else if value >= *range.start() {
        value
    } else {
        *range.start()
    }
}
