// Host-side tests for rotation smoothing, drag tracking and zoom.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod hull {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod controls {
        include!("../src/core/controls.rs");
    }
}

use glam::{Quat, Vec2, Vec3};
use hull::constants::*;
use hull::controls::*;

#[test]
fn smoothing_converges_without_overshoot() {
    let mut r = RotationState {
        current: Vec2::ZERO,
        target: Vec2::new(1.0, -2.0),
    };
    let mut prev_gap = (r.target - r.current).abs();
    for _ in 0..200 {
        r.step(ROTATION_BLEND);
        let gap = (r.target - r.current).abs();
        assert!(gap.x <= prev_gap.x && gap.y <= prev_gap.y);
        // never crosses the target
        assert!(r.current.x <= 1.0 && r.current.y >= -2.0);
        prev_gap = gap;
    }
    assert!(r.current.distance(r.target) < 1e-4);
}

#[test]
fn one_step_closes_blend_fraction_of_gap() {
    let mut r = RotationState {
        current: Vec2::ZERO,
        target: Vec2::new(1.0, 0.0),
    };
    r.step(0.1);
    assert!((r.current.x - 0.1).abs() < 1e-6);
    r.step(5.0); // clamped to a full step
    assert_eq!(r.current, r.target);
}

#[test]
fn horizontal_drag_yaws_vertical_drag_pitches() {
    let mut r = RotationState::default();
    r.nudge_target(Vec2::new(100.0, 0.0));
    assert!((r.target.y - 1.0).abs() < 1e-6);
    assert_eq!(r.target.x, 0.0);
    r.nudge_target(Vec2::new(0.0, -50.0));
    assert!((r.target.x + 0.5).abs() < 1e-6);
}

#[test]
fn non_finite_drag_is_ignored() {
    let mut r = RotationState::default();
    r.nudge_target(Vec2::new(f32::NAN, 1.0));
    r.nudge_target(Vec2::new(f32::INFINITY, 0.0));
    assert_eq!(r.target, Vec2::ZERO);
}

#[test]
fn euler_pair_applies_pitch_then_yaw() {
    let (x, y) = (0.3, -0.7);
    let q = euler_xy(Vec2::new(x, y));
    let v = Vec3::new(0.2, 0.5, 1.0);
    let expected = Quat::from_rotation_x(x) * (Quat::from_rotation_y(y) * v);
    assert!((q * v).distance(expected) < 1e-5);
    assert!(euler_xy(Vec2::ZERO).angle_between(Quat::IDENTITY) < 1e-6);
}

#[test]
fn drag_state_machine() {
    let mut c = Controls::new(CAMERA_START_Z);
    assert!(!c.is_dragging());
    assert_eq!(c.move_to(Vec2::new(10.0, 10.0)), None);
    assert_eq!(c.rotation.target, Vec2::ZERO);

    c.press(Vec2::new(10.0, 10.0));
    assert!(c.is_dragging());
    assert_eq!(c.move_to(Vec2::new(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
    assert_eq!(c.move_to(Vec2::new(20.0, 8.0)), Some(Vec2::new(5.0, 0.0)));
    assert!((c.rotation.target.y - 0.1).abs() < 1e-6);
    assert!((c.rotation.target.x + 0.02).abs() < 1e-6);

    assert!(c.release());
    assert!(!c.release());
    assert_eq!(c.move_to(Vec2::new(99.0, 99.0)), None);
}

#[test]
fn press_without_move_still_counts_as_release() {
    let mut c = Controls::new(CAMERA_START_Z);
    c.press(Vec2::new(3.0, 4.0));
    assert!(c.release());
    assert_eq!(c.rotation.target, Vec2::ZERO);
}

#[test]
fn wheel_zoom_scales_delta() {
    let mut c = Controls::new(5.0);
    let z = c.wheel(100.0);
    assert!((z - (5.0 + 100.0 * ZOOM_SPEED * ZOOM_DELTA_SCALE)).abs() < 1e-6);
    let z = c.wheel(-100.0);
    assert!((z - 5.0).abs() < 1e-5);
}

#[test]
fn zoom_stays_clamped_for_any_delta() {
    let deltas = [
        1e9,
        -1e9,
        f32::MAX,
        f32::MIN,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        0.0,
        -3.0,
        4000.0,
    ];
    let mut c = Controls::new(CAMERA_START_Z);
    for d in deltas.iter().cycle().take(100) {
        let z = c.wheel(*d);
        assert!(
            (MIN_CAMERA_DISTANCE..=MAX_CAMERA_DISTANCE).contains(&z),
            "delta {d} -> {z}"
        );
    }
}

#[test]
fn clamp_distance_handles_nan() {
    assert_eq!(clamp_distance(f32::NAN), MIN_CAMERA_DISTANCE);
    assert_eq!(clamp_distance(100.0), MAX_CAMERA_DISTANCE);
    assert_eq!(clamp_distance(0.5), MIN_CAMERA_DISTANCE);
    assert_eq!(Controls::new(f32::NAN).camera_distance, MIN_CAMERA_DISTANCE);
}
