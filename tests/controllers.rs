use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use glam::{DVec3, Mat4, Vec2, Vec3, Vec4};
use webgl_applets::controllers::{SphericalRotator, TrackballOptions, TrackballRotator, TrackballState};

const SIZE: Vec2 = Vec2::new(800.0, 600.0);
const CENTER: Vec2 = Vec2::new(400.0, 300.0);

fn assert_mat4_near(a: Mat4, b: Mat4, epsilon: f32) {
    for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
        assert_abs_diff_eq!(x, y, epsilon = epsilon);
    }
}

fn assert_orthonormal(rotator: &TrackballRotator) {
    let (x, y, z) = rotator.frame();
    for axis in [x, y, z] {
        assert_abs_diff_eq!(axis.length(), 1.0, epsilon = 1e-5);
    }
    assert_abs_diff_eq!(x.dot(y), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(y.dot(z), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(z.dot(x), 0.0, epsilon = 1e-5);
    // Right-handed.
    assert_abs_diff_eq!(x.cross(y).dot(z), 1.0, epsilon = 1e-5);
}

fn unit_trackball() -> TrackballRotator {
    TrackballRotator::new(&TrackballOptions {
        view_distance: 0.0,
        viewpoint_direction: Vec3::Z,
        view_up: Vec3::Y,
        rotation_center: None,
    })
}

#[test]
fn initial_frame_is_identity() {
    let rotator = unit_trackball();
    assert_eq!(rotator.state(), TrackballState::Idle);
    assert_mat4_near(rotator.view_matrix(), Mat4::IDENTITY, 1e-6);
}

#[test]
fn view_up_is_orthogonalised() {
    let rotator = TrackballRotator::new(&TrackballOptions {
        view_distance: 5.0,
        viewpoint_direction: Vec3::new(0.0, 0.0, 3.0),
        view_up: Vec3::new(0.0, 1.0, 1.0),
        rotation_center: None,
    });
    let (_, up, forward) = rotator.frame();
    assert_abs_diff_eq!(up.dot(forward), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(up.y, 1.0, epsilon = 1e-6);
    assert_orthonormal(&rotator);
}

#[test]
fn zero_delta_drag_keeps_view() {
    let mut rotator = unit_trackball();
    rotator.begin(CENTER, SIZE);
    let view = rotator.drag(CENTER).expect("dragging");
    assert_mat4_near(view, Mat4::IDENTITY, 1e-6);

    let off_center = Vec2::new(470.0, 260.0);
    let mut rotator = unit_trackball();
    rotator.begin(off_center, SIZE);
    let view = rotator.drag(off_center).expect("dragging");
    assert_mat4_near(view, Mat4::IDENTITY, 1e-5);
}

#[test]
fn drag_requires_begin() {
    let mut rotator = unit_trackball();
    assert!(rotator.drag(Vec2::new(10.0, 10.0)).is_none());

    rotator.begin(CENTER, SIZE);
    assert!(rotator.is_dragging());
    rotator.end();
    assert!(!rotator.is_dragging());
    assert!(rotator.drag(Vec2::new(10.0, 10.0)).is_none());

    // Ending twice is harmless.
    rotator.end();
    assert_eq!(rotator.state(), TrackballState::Idle);
}

#[test]
fn begin_captures_center_and_radius() {
    let mut rotator = unit_trackball();
    rotator.begin(Vec2::new(5.0, 6.0), SIZE);
    match rotator.state() {
        TrackballState::Dragging {
            center,
            squared_radius,
            previous,
        } => {
            assert_eq!(center, CENTER);
            assert_eq!(squared_radius, 300.0 * 300.0);
            assert_eq!(previous, Vec2::new(5.0, 6.0));
        }
        TrackballState::Idle => panic!("expected a drag"),
    }
}

#[test]
fn horizontal_drag_rotates_about_vertical_axis() {
    let mut rotator = unit_trackball();
    rotator.begin(CENTER, SIZE);
    let view = rotator.drag(CENTER + Vec2::new(60.0, 0.0)).expect("dragging");

    // The up axis is untouched by a purely horizontal drag.
    let (_, up, forward) = rotator.frame();
    assert_abs_diff_eq!(up.y, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(forward.y, 0.0, epsilon = 1e-5);
    // The frame turns against the pointer, carrying the new hemisphere point
    // back onto the old one.
    assert_abs_diff_eq!(forward.x, -0.2, epsilon = 1e-5);
    assert_abs_diff_eq!(forward.z, (1.0f32 - 0.04).sqrt(), epsilon = 1e-5);
    assert!(view.to_cols_array().iter().all(|v| v.is_finite()));
    assert_orthonormal(&rotator);
}

#[test]
fn frame_stays_orthonormal_over_long_drags() {
    let mut rotator = unit_trackball();
    rotator.begin(CENTER, SIZE);
    for i in 0..2000 {
        let t = i as f32 * 0.05;
        // Sweeps inside and outside the hemisphere circle.
        let p = CENTER + Vec2::new(t.cos() * (150.0 + 200.0 * (t * 0.3).sin()), t.sin() * 250.0);
        rotator.drag(p);
    }
    assert_orthonormal(&rotator);
}

#[test]
fn drag_outside_circle_spins_about_view_axis() {
    let mut rotator = unit_trackball();
    rotator.begin(CENTER + Vec2::new(390.0, 0.0), SIZE);
    rotator.drag(CENTER + Vec2::new(0.0, -299.0 - 80.0));

    // Both points lie in the image plane, so forward is preserved.
    let (_, _, forward) = rotator.frame();
    assert_abs_diff_eq!(forward.z, 1.0, epsilon = 1e-5);
    assert_orthonormal(&rotator);
}

#[test]
fn wheel_moves_along_view_axis() {
    let mut rotator = TrackballRotator::new(&TrackballOptions::looking_from(Vec3::new(0.0, 0.0, 10.0)));
    assert_eq!(rotator.view_distance(), 10.0);
    assert_eq!(rotator.view_matrix().w_axis, Vec4::new(0.0, 0.0, -10.0, 1.0));

    let view = rotator.wheel(100.0);
    assert_eq!(rotator.view_distance(), 9.0);
    assert_eq!(view.w_axis.z, -9.0);

    // Unclamped, distance may go negative.
    rotator.wheel(2000.0);
    assert_eq!(rotator.view_distance(), -11.0);
}

#[test]
fn wheel_works_while_idle_and_dragging() {
    let mut rotator = unit_trackball();
    rotator.wheel(-50.0);
    rotator.begin(CENTER, SIZE);
    rotator.wheel(-50.0);
    assert_abs_diff_eq!(rotator.view_distance(), 1.0);
    assert!(rotator.is_dragging());
}

#[test]
fn rotation_center_stays_fixed() {
    let center = Vec3::new(1.0, 2.0, -3.0);
    let mut rotator = TrackballRotator::new(&TrackballOptions {
        view_distance: 0.0,
        viewpoint_direction: Vec3::Z,
        view_up: Vec3::Y,
        rotation_center: Some(center),
    });
    rotator.begin(CENTER, SIZE);
    let view = rotator.drag(CENTER + Vec2::new(40.0, 70.0)).expect("dragging");

    let moved = view.transform_point3(center);
    assert_abs_diff_eq!(moved.x, center.x, epsilon = 1e-5);
    assert_abs_diff_eq!(moved.y, center.y, epsilon = 1e-5);
    assert_abs_diff_eq!(moved.z, center.z, epsilon = 1e-5);
}

#[test]
fn degenerate_element_does_not_produce_nan() {
    let mut rotator = unit_trackball();
    rotator.begin(Vec2::ZERO, Vec2::ZERO);
    let view = rotator.drag(Vec2::ZERO).expect("dragging");
    assert!(view.to_cols_array().iter().all(|v| v.is_finite()));
}

#[test]
fn spherical_starts_from_eye() {
    let rotator = SphericalRotator::new(DVec3::new(0.0, 0.0, 10.0));
    assert_eq!(rotator.radius(), 10.0);
    assert_abs_diff_eq!(rotator.latitude(), PI / 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotator.longitude(), 0.0);

    let eye = rotator.eye();
    assert_abs_diff_eq!(eye.z, 10.0, epsilon = 1e-12);
}

#[test]
fn spherical_drag_turns_by_pi_per_element_span() {
    let mut rotator = SphericalRotator::new(DVec3::new(0.0, 0.0, 10.0));
    let eye = rotator.drag(400.0, 0.0, 800.0, 600.0);
    assert_abs_diff_eq!(rotator.longitude(), -PI / 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(eye.x, -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(eye.z, 0.0, epsilon = 1e-9);

    rotator.drag(0.0, 300.0, 800.0, 600.0);
    assert_abs_diff_eq!(rotator.latitude(), 0.0, epsilon = 1e-12);
}

#[test]
fn spherical_wheel_round_trip_is_exact() {
    let mut rotator = SphericalRotator::new(DVec3::new(0.0, 0.0, 10.0));
    let before = rotator.radius();
    let eye = rotator.wheel(100.0);
    assert_eq!(rotator.radius(), 9.0);
    assert_abs_diff_eq!(eye.length(), 9.0, epsilon = 1e-12);
    rotator.wheel(-100.0);
    assert_eq!(rotator.radius(), before);
}

#[test]
fn spherical_view_matrix_looks_at_origin() {
    let rotator = SphericalRotator::new(DVec3::new(3.0, 4.0, 5.0));
    let view = rotator.view_matrix();
    let origin = view.transform_point3(DVec3::ZERO);
    assert_abs_diff_eq!(origin.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(origin.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(origin.z, -rotator.radius(), epsilon = 1e-9);

    // Straight above the origin the fallback up vector keeps things finite.
    let pole = SphericalRotator::new(DVec3::new(0.0, 2.0, 0.0));
    assert!(pole.view_matrix().to_cols_array().iter().all(|v| v.is_finite()));
}
