use std::f64::consts::PI;

use glam::{DVec3, Vec3};

/// A point expressed as (radius, inclination from +Y, azimuth around +Y
/// measured from +Z towards +X).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f64,
    pub inclination: f64,
    pub azimuth: f64,
}

impl Spherical {
    pub fn new(radius: f64, inclination: f64, azimuth: f64) -> Self {
        Self {
            radius,
            inclination,
            azimuth,
        }
    }

    pub fn to_cartesian(self) -> DVec3 {
        spherical_to_cartesian(self.radius, self.inclination, self.azimuth)
    }
}

impl From<DVec3> for Spherical {
    fn from(p: DVec3) -> Self {
        cartesian_to_spherical(p.x, p.y, p.z)
    }
}

/// The origin maps to `(0, 0, 0)` rather than `atan2(0, 0)`.
pub fn cartesian_to_spherical(x: f64, y: f64, z: f64) -> Spherical {
    if x == 0.0 && y == 0.0 && z == 0.0 {
        return Spherical::default();
    }

    let radius = (x * x + y * y + z * z).sqrt();
    let planar = (x * x + z * z).sqrt();

    Spherical {
        radius,
        inclination: planar.atan2(y),
        azimuth: x.atan2(z),
    }
}

/// Angles are wrapped (`inclination` mod π, `azimuth` mod 2π) before use, so
/// an inclination of π lands on the top pole, not the bottom one.
pub fn spherical_to_cartesian(radius: f64, inclination: f64, azimuth: f64) -> DVec3 {
    let theta = inclination % PI;
    let phi = azimuth % (2.0 * PI);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    DVec3::new(
        radius * sin_theta * sin_phi,
        radius * cos_theta,
        radius * sin_theta * cos_phi,
    )
}

/// Flat per-triangle normals for a packed `[x, y, z, ...]` triangle list.
///
/// Each triangle's normal is `(v2 - v1) × (v3 - v1)` normalised and written to
/// all three of its vertices. Degenerate triangles get a zero normal. Any
/// trailing floats that do not form a whole triangle are left zeroed.
pub fn flat_normals(positions: &[f32]) -> Vec<f32> {
    let mut normals = vec![0.0; positions.len()];

    for (triangle, out) in positions.chunks_exact(9).zip(normals.chunks_exact_mut(9)) {
        let v1 = Vec3::from_slice(&triangle[0..3]);
        let v2 = Vec3::from_slice(&triangle[3..6]);
        let v3 = Vec3::from_slice(&triangle[6..9]);

        let normal = (v2 - v1).cross(v3 - v1).normalize_or_zero();
        for vertex in out.chunks_exact_mut(3) {
            normal.write_to_slice(vertex);
        }
    }
    normals
}

/// Unit cube spanning [0, 1]³ as a 36-vertex triangle list. Faces come in the
/// order front, back, top, bottom, right, left.
pub fn cube() -> Vec<f32> {
    let v = [
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];

    #[rustfmt::skip]
    let indices: [usize; 36] = [
        0, 1, 2, 2, 3, 0, // front
        4, 6, 5, 6, 4, 7, // back
        3, 2, 6, 6, 7, 3, // top
        4, 5, 1, 1, 0, 4, // bottom
        1, 5, 6, 6, 2, 1, // right
        4, 0, 3, 3, 7, 4, // left
    ];

    indices.iter().flat_map(|&i| v[i]).collect()
}
