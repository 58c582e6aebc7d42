//! Height-field triangulation over the [-1, 1]² footprint.
//!
//! A resolution of `n` samples an n×n lattice of corner points and emits
//! (n-1)² quads, rows outermost and columns innermost. Column `c` maps to
//! `x = 2c/n - 1`, row `r` to `y = -(2r/n - 1)` (row 0 at the top), and the
//! height field supplies `z`.
//!
//! ```text
//! v0    v1
//! +-----+
//! |   / |
//! | /   |
//! +-----+
//! v2    v3
//! ```
//!
//! Each quad becomes the triangles (v0, v2, v1) and (v1, v2, v3), both
//! counter-clockwise when seen from +z.

use log::debug;

use crate::maths::geometry::flat_normals;
use crate::maths::noise::HeightField;

pub const FLOATS_PER_VERTEX: usize = 3;
pub const VERTICES_PER_QUAD: usize = 6;

/// Number of floats in the position buffer for `resolution`.
pub fn buffer_len(resolution: usize) -> usize {
    let quads = resolution.saturating_sub(1);
    FLOATS_PER_VERTEX * VERTICES_PER_QUAD * quads * quads
}

fn col_to_x(col: usize, resolution: usize) -> f64 {
    2.0 * col as f64 / resolution as f64 - 1.0
}

fn row_to_y(row: usize, resolution: usize) -> f64 {
    -(2.0 * row as f64 / resolution as f64 - 1.0)
}

fn vertex<F: HeightField + ?Sized>(col: usize, row: usize, resolution: usize, field: &F) -> [f32; 3] {
    let x = col_to_x(col, resolution);
    let y = row_to_y(row, resolution);
    let z = field.height(x, y);
    [x as f32, y as f32, z as f32]
}

/// Packed triangle-list positions. Resolutions below 2 give an empty buffer.
pub fn surface_positions<F: HeightField + ?Sized>(resolution: usize, field: &F) -> Vec<f32> {
    let mut positions = Vec::with_capacity(buffer_len(resolution));
    if resolution < 2 {
        return positions;
    }

    for row in 0..resolution - 1 {
        for col in 0..resolution - 1 {
            let v0 = vertex(col, row, resolution, field);
            let v1 = vertex(col + 1, row, resolution, field);
            let v2 = vertex(col, row + 1, resolution, field);
            let v3 = vertex(col + 1, row + 1, resolution, field);

            for v in [v0, v2, v1, v1, v2, v3] {
                positions.extend_from_slice(&v);
            }
        }
    }
    positions
}

/// Positions plus matching flat-shaded normals, ready for upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh {
    pub resolution: usize,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl SurfaceMesh {
    pub fn build<F: HeightField + ?Sized>(resolution: usize, field: &F) -> Self {
        let positions = surface_positions(resolution, field);
        let normals = flat_normals(&positions);
        debug!(
            "built surface mesh: resolution {}, {} vertices",
            resolution,
            positions.len() / FLOATS_PER_VERTEX
        );
        Self {
            resolution,
            positions,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_VERTEX
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
