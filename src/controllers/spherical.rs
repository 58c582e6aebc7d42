use std::f64::consts::PI;

use glam::{DMat4, DVec3};
use log::trace;

use crate::maths::geometry::{cartesian_to_spherical, spherical_to_cartesian};

/// Wheel deltas are divided by this before being applied to the radius.
pub const WHEEL_STEP: f64 = 100.0;

/// Orbits the origin by editing (radius, latitude, longitude) directly.
///
/// Dragging across the full height of the element turns the latitude by π,
/// and across the full width turns the longitude by π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRotator {
    radius: f64,
    latitude: f64,
    longitude: f64,
}

impl SphericalRotator {
    pub fn new(eye: DVec3) -> Self {
        let s = cartesian_to_spherical(eye.x, eye.y, eye.z);
        Self {
            radius: s.radius,
            latitude: s.inclination,
            longitude: s.azimuth,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Applies a pointer movement (in pixels) on an element of the given size
    /// and returns the new eye position.
    pub fn drag(&mut self, movement_x: f64, movement_y: f64, width: f64, height: f64) -> DVec3 {
        self.latitude -= movement_y * PI / height;
        self.longitude -= movement_x * PI / width;
        trace!(
            "spherical rotator at latitude {}, longitude {}",
            self.latitude,
            self.longitude
        );
        self.eye()
    }

    /// `radius -= delta_y / 100`, unclamped; returns the new eye position.
    pub fn wheel(&mut self, delta_y: f64) -> DVec3 {
        self.radius -= delta_y / WHEEL_STEP;
        self.eye()
    }

    pub fn eye(&self) -> DVec3 {
        spherical_to_cartesian(self.radius, self.latitude, self.longitude)
    }

    /// Right-handed look-at from the eye towards the origin, +Y up. At the
    /// poles +Y is parallel to the view axis, so +Z stands in for it.
    pub fn view_matrix(&self) -> DMat4 {
        let eye = self.eye();
        let up = if eye.cross(DVec3::Y).length_squared() > f64::EPSILON {
            DVec3::Y
        } else {
            DVec3::Z
        };
        DMat4::look_at_rh(eye, DVec3::ZERO, up)
    }
}
