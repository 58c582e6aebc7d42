//! Virtual-trackball rotation.
//!
//! Pointer positions are lifted onto a hemisphere whose equator is the
//! largest circle that fits the element. Each drag step rotates the camera
//! frame by the rotation that carries the current lifted point back onto the
//! previous one, so the scene appears to follow the pointer. That rotation is
//! built as two reflections (a transvection), so no inverse trigonometry runs
//! per step.

use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, trace};

/// Wheel deltas are divided by this before being applied to the distance.
pub const WHEEL_STEP: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballOptions {
    /// Distance from the eye to the rotation center along the view axis.
    pub view_distance: f32,
    /// Direction from the rotation center towards the eye.
    pub viewpoint_direction: Vec3,
    /// Approximate up direction; only its component orthogonal to
    /// `viewpoint_direction` is used.
    pub view_up: Vec3,
    /// Point kept fixed by rotations, the origin when unset.
    pub rotation_center: Option<Vec3>,
}

impl Default for TrackballOptions {
    fn default() -> Self {
        Self {
            view_distance: 10.0,
            viewpoint_direction: Vec3::new(0.0, 0.0, 10.0),
            view_up: Vec3::Y,
            rotation_center: None,
        }
    }
}

impl TrackballOptions {
    /// Options for a camera placed at `eye`, looking at the origin.
    pub fn looking_from(eye: Vec3) -> Self {
        Self {
            view_distance: eye.length(),
            viewpoint_direction: eye,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackballState {
    Idle,
    Dragging {
        center: Vec2,
        squared_radius: f32,
        previous: Vec2,
    },
}

/// Orthonormal camera frame plus view distance.
#[derive(Debug, Clone)]
pub struct TrackballRotator {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    view_distance: f32,
    rotation_center: Option<Vec3>,
    state: TrackballState,
}

impl Default for TrackballRotator {
    fn default() -> Self {
        Self::new(&TrackballOptions::default())
    }
}

impl TrackballRotator {
    pub fn new(options: &TrackballOptions) -> Self {
        let forward = options.viewpoint_direction.try_normalize().unwrap_or(Vec3::Z);
        let up = (options.view_up - forward * forward.dot(options.view_up))
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let right = up.cross(forward);

        Self {
            right,
            up,
            forward,
            view_distance: options.view_distance,
            rotation_center: options.rotation_center,
            state: TrackballState::Idle,
        }
    }

    pub fn state(&self) -> TrackballState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, TrackballState::Dragging { .. })
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    /// The (right, up, forward) axes.
    pub fn frame(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.forward)
    }

    /// Starts a drag at `pointer` (element-relative pixels, y down) on an
    /// element of `element_size`. Ignored while already dragging.
    pub fn begin(&mut self, pointer: Vec2, element_size: Vec2) {
        if self.is_dragging() {
            return;
        }
        let center = element_size * 0.5;
        let radius = center.x.min(center.y);
        self.state = TrackballState::Dragging {
            center,
            squared_radius: radius * radius,
            previous: pointer,
        };
        debug!("trackball drag started at ({}, {})", pointer.x, pointer.y);
    }

    /// Rotates by the step from the previous pointer position to `pointer`
    /// and returns the new view matrix. `None` when no drag is in progress.
    pub fn drag(&mut self, pointer: Vec2) -> Option<Mat4> {
        let TrackballState::Dragging {
            center,
            squared_radius,
            previous,
        } = self.state
        else {
            return None;
        };

        let from = self.to_ray(previous, center, squared_radius);
        let to = self.to_ray(pointer, center, squared_radius);
        self.apply_transvection(from, to);
        trace!("trackball step {:?} -> {:?}", previous, pointer);

        self.state = TrackballState::Dragging {
            center,
            squared_radius,
            previous: pointer,
        };
        Some(self.view_matrix())
    }

    /// Ends the drag; a no-op when idle.
    pub fn end(&mut self) {
        if self.is_dragging() {
            self.state = TrackballState::Idle;
            debug!("trackball drag ended");
        }
    }

    /// Moves the eye along the view axis by `-delta_y / 100`. Not clamped.
    pub fn wheel(&mut self, delta_y: f32) -> Mat4 {
        self.view_distance -= delta_y / WHEEL_STEP;
        self.view_matrix()
    }

    /// Rows of the rotation are the frame axes. The translation keeps the
    /// rotation center fixed, then pushes the scene `view_distance` away.
    pub fn view_matrix(&self) -> Mat4 {
        let (x, y, z) = (self.right, self.up, self.forward);
        let rotation = Mat4::from_cols(
            Vec4::new(x.x, y.x, z.x, 0.0),
            Vec4::new(x.y, y.y, z.y, 0.0),
            Vec4::new(x.z, y.z, z.z, 0.0),
            Vec4::W,
        );

        let mut translation = match self.rotation_center {
            Some(c) => c - rotation.transform_vector3(c),
            None => Vec3::ZERO,
        };
        translation.z -= self.view_distance;

        let mut view = rotation;
        view.w_axis = translation.extend(1.0);
        view
    }

    /// Lifts a pixel position onto the hemisphere. Points outside the circle
    /// stay in the image plane, which turns edge drags into spins about the
    /// view axis.
    fn to_ray(&self, pointer: Vec2, center: Vec2, squared_radius: f32) -> Vec3 {
        let dx = pointer.x - center.x;
        let dy = center.y - pointer.y;

        let v = self.right * dx + self.up * dy;
        let planar = v.length_squared();
        if planar <= squared_radius {
            v + self.forward * (squared_radius - planar).sqrt()
        } else {
            v
        }
    }

    /// Rotates the frame by the rotation carrying `to` onto `from`: reflect
    /// across their bisector, then across `from`.
    fn apply_transvection(&mut self, from: Vec3, to: Vec3) {
        let (Some(e1), Some(e2)) = (from.try_normalize(), to.try_normalize()) else {
            return;
        };
        let Some(bisector) = (e1 + e2).try_normalize() else {
            return;
        };

        let rotate = |v: Vec3| reflect(e1, reflect(bisector, v));
        self.forward = rotate(self.forward);
        self.right = rotate(self.right);
        self.up = rotate(self.up);

        self.orthonormalize();
    }

    /// Gram-Schmidt on forward then up; removes drift accumulated over many
    /// steps.
    fn orthonormalize(&mut self) {
        self.forward = self.forward.normalize();
        self.up = (self.up - self.forward * self.forward.dot(self.up)).normalize();
        self.right = self.up.cross(self.forward);
    }
}

/// Reflection of `v` across the line through unit vector `axis`.
fn reflect(axis: Vec3, v: Vec3) -> Vec3 {
    axis * (2.0 * axis.dot(v)) - v
}
