//! The lit-cube applet: a unit cube turning about its vertical axis, seen
//! through either an orthographic or a perspective projection.

use std::f32::consts::PI;
use std::str::FromStr;

use glam::{Mat3, Mat4, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::maths::geometry::{cube, flat_normals};
use crate::maths::matrix::{normal_matrix, Transform3D};
use crate::settings::SettingsError;

/// Where the camera starts.
pub const EYE: Vec3 = Vec3::new(6.0, 2.0, 6.0);
/// Turn about +Y per animation frame, in radians.
pub const ROTATION_STEP: f32 = 0.01;
pub const FIELD_OF_VIEW: f32 = PI / 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Orthographic,
    #[default]
    Perspective,
}

impl FromStr for Projection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthographic" => Ok(Projection::Orthographic),
            "perspective" => Ok(Projection::Perspective),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeSettings {
    pub projection: Projection,
    pub animate: bool,
}

impl CubeSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One edit from the cube applet's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeChange {
    Projection(Projection),
    Animate(bool),
}

impl CubeChange {
    pub fn parse(name: &str, value: &str) -> Result<Self, SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            field: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "projection" => value.trim().parse().map(CubeChange::Projection).map_err(|_| invalid()),
            "animate" => value.trim().parse().map(CubeChange::Animate).map_err(|_| invalid()),
            _ => Err(SettingsError::UnknownField(name.to_string())),
        }
    }
}

/// Cube geometry plus the state that changes between frames.
#[derive(Debug, Clone)]
pub struct CubeScene {
    settings: CubeSettings,
    angle_y: f32,
    positions: Vec<f32>,
    normals: Vec<f32>,
}

impl CubeScene {
    pub fn new(settings: CubeSettings) -> Self {
        let positions = cube();
        let normals = flat_normals(&positions);
        Self {
            settings,
            angle_y: 0.0,
            positions,
            normals,
        }
    }

    pub fn settings(&self) -> CubeSettings {
        self.settings
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn angle_y(&self) -> f32 {
        self.angle_y
    }

    pub fn apply(&mut self, change: CubeChange) {
        debug!("applying {:?}", change);
        match change {
            CubeChange::Projection(projection) => self.settings.projection = projection,
            CubeChange::Animate(animate) => self.settings.animate = animate,
        }
    }

    /// Advances the spin by one frame. Returns whether anything moved.
    pub fn advance(&mut self) -> bool {
        if self.settings.animate {
            self.angle_y += ROTATION_STEP;
        }
        self.settings.animate
    }

    /// Centers the cube on the origin, then spins it.
    pub fn model_matrix(&self) -> Mat4 {
        Transform3D::new()
            .y_rotate(self.angle_y)
            .translate(-0.5, -0.5, -0.5)
            .matrix()
    }

    pub fn projection(&self, aspect: f32) -> Transform3D {
        match self.settings.projection {
            Projection::Perspective => Transform3D::new().perspective(FIELD_OF_VIEW, aspect, 1.0, f32::INFINITY),
            Projection::Orthographic => Transform3D::new().orthographic(-2.0, 2.0, -2.0, 2.0, 1.0, 20.0),
        }
    }

    pub fn mvp(&self, aspect: f32, view: Mat4) -> Mat4 {
        self.projection(aspect)
            .then(view)
            .then(self.model_matrix())
            .matrix()
    }

    pub fn normal_matrix(&self) -> Mat3 {
        normal_matrix(&self.model_matrix())
    }
}
