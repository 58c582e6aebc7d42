//! Column-major 3×3 (2D homogeneous) and 4×4 matrix builders.
//!
//! Layouts follow WebGL: every matrix is stored column by column, so
//! `to_cols_array()` can be handed straight to `uniformMatrix*fv`.

use glam::{Mat3, Mat4};

pub mod mat3 {
    use super::Mat3;

    pub fn translation(tx: f32, ty: f32) -> Mat3 {
        Mat3::from_cols_array(&[
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            tx, ty, 1.0,
        ])
    }

    /// Rotation in the 2D applets' convention: positive angles turn clockwise
    /// on screen, because pixel space has y pointing down.
    pub fn rotation(angle: f32) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::from_cols_array(&[
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    pub fn scaling(sx: f32, sy: f32) -> Mat3 {
        Mat3::from_cols_array(&[
            sx, 0.0, 0.0, //
            0.0, sy, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    /// Maps pixel coordinates (origin top-left, y down) to clip space.
    pub fn projection(width: f32, height: f32) -> Mat3 {
        multiply(&[
            translation(-1.0, 1.0),
            scaling(2.0, -2.0),
            scaling(1.0 / width, 1.0 / height),
        ])
    }

    /// Left-to-right product of `matrices`; the empty product is the identity.
    pub fn multiply(matrices: &[Mat3]) -> Mat3 {
        matrices.iter().fold(Mat3::IDENTITY, |acc, m| acc * *m)
    }
}

pub mod mat4 {
    use super::Mat4;

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let sx = 2.0 / (right - left);
        let sy = 2.0 / (top - bottom);
        let sz = 2.0 / (near - far);

        let tx = (left + right) / (left - right);
        let ty = (bottom + top) / (bottom - top);
        let tz = (near + far) / (near - far);

        Mat4::from_cols_array(&[
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            tx, ty, tz, 1.0,
        ])
    }

    /// OpenGL-style perspective projection. `far` may be `f32::INFINITY`.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (0.5 * fov).tan();
        let (m22, m32) = if far.is_finite() {
            let range_inv = 1.0 / (near - far);
            ((near + far) * range_inv, 2.0 * near * far * range_inv)
        } else {
            (-1.0, -2.0 * near)
        };

        Mat4::from_cols_array(&[
            f / aspect, 0.0, 0.0, 0.0, //
            0.0, f, 0.0, 0.0, //
            0.0, 0.0, m22, -1.0, //
            0.0, 0.0, m32, 0.0,
        ])
    }

    pub fn y_rotation(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_cols_array(&[
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            tx, ty, tz, 1.0,
        ])
    }
}

/// Fluent 2D transform. Each step is applied after the ones already recorded
/// (it pre-multiplies), so `translate` then `project` maps model space to clip
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D(Mat3);

impl Default for Transform2D {
    fn default() -> Self {
        Self(Mat3::IDENTITY)
    }
}

impl Transform2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(self, width: f32, height: f32) -> Self {
        Self(mat3::projection(width, height) * self.0)
    }

    pub fn rotate(self, angle: f32) -> Self {
        Self(mat3::rotation(angle) * self.0)
    }

    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self(mat3::scaling(sx, sy) * self.0)
    }

    pub fn translate(self, tx: f32, ty: f32) -> Self {
        Self(mat3::translation(tx, ty) * self.0)
    }

    pub fn matrix(&self) -> Mat3 {
        self.0
    }
}

/// Fluent 3D transform. Each step post-multiplies, the usual
/// projection-then-view-then-model order for building an MVP matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D(Mat4);

impl Default for Transform3D {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl Transform3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orthographic(self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self(self.0 * mat4::orthographic(left, right, bottom, top, near, far))
    }

    pub fn perspective(self, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self(self.0 * mat4::perspective(fov, aspect, near, far))
    }

    pub fn y_rotate(self, angle: f32) -> Self {
        Self(self.0 * mat4::y_rotation(angle))
    }

    pub fn translate(self, tx: f32, ty: f32, tz: f32) -> Self {
        Self(self.0 * mat4::translation(tx, ty, tz))
    }

    /// Post-multiplies an arbitrary matrix, e.g. a controller's view matrix.
    pub fn then(self, m: Mat4) -> Self {
        Self(self.0 * m)
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }
}

/// Inverse-transpose of the upper-left 3×3 block, for transforming normals.
/// A singular block yields the zero matrix instead of NaNs.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    let m = Mat3::from_mat4(*model);
    if m.determinant() == 0.0 {
        return Mat3::ZERO;
    }
    m.inverse().transpose()
}
