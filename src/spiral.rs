//! The square-spiral applet: nested square outlines, each smaller and turned
//! a little further than the last, drawn in pixel space.

use std::f32::consts::PI;

use glam::Mat3;

use crate::maths::matrix::Transform2D;

pub const SQUARE_COUNT: usize = 128;

/// Fraction of the canvas' shorter side covered by the outermost square.
const OUTER_SCALE: f32 = 0.8;

/// One outline to draw: the pixel-to-clip transform and its colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub transform: Mat3,
    pub color: [f32; 3],
}

/// Corners of a `side`-pixel square anchored at the origin, as a line loop.
pub fn square(side: f32) -> [f32; 8] {
    [0.0, 0.0, side, 0.0, side, side, 0.0, side]
}

/// Shorter side of the canvas; every outline is a scaled [`square`] of this.
pub fn side(width: f32, height: f32) -> f32 {
    width.min(height).max(1.0)
}

/// Outlines for a `width`×`height` canvas, outermost first. Square `i` is
/// scaled by `0.8 (1 - (i + 1) / count)`, turned by `2πi / count` and
/// centered on the canvas.
pub fn outlines(width: f32, height: f32, count: usize) -> Vec<Outline> {
    let (width, height) = (width.max(1.0), height.max(1.0));
    let l = side(width, height);

    (0..count)
        .map(|i| {
            let t = (i + 1) as f32 / count as f32;
            let scale = OUTER_SCALE * (1.0 - t);
            let transform = Transform2D::new()
                .translate(-l / 2.0, -l / 2.0)
                .rotate(2.0 * PI * i as f32 / count as f32)
                .scale(scale, scale)
                .translate(width / 2.0, height / 2.0)
                .project(width, height)
                .matrix();
            Outline {
                transform,
                color: [t, 0.2, 1.0 - t],
            }
        })
        .collect()
}
