//! Per-tick velocity integration for the player.
//!
//! Velocity is integrated with forward Euler in two parts:
//!
//! ```text
//! 1. v.y -= g * dt                      (skipped while grounded)
//! 2. v.xz = wish(input, yaw) * speed    (direct control, no acceleration)
//! ```
//!
//! While airborne, horizontal speed above walking speed is carried instead
//! of replaced: momentum picked up falling through a portal survives until
//! the body lands.
//!
//! Gravity must be integrated before collision resolution in the same tick.
//! Resolving first and adding gravity afterwards lets a fast fall carry the
//! body through a thin floor on the next tick.

use crate::camera::Camera;
use crate::types::Vec3;

/// Movement intent for one tick, as sampled from the input device.
///
/// `[forward, right, up]`, each conventionally in [-1, 1].
pub type MoveInput = [f32; 3];

/// Integrate gravity into the vertical velocity.
///
/// A grounded body keeps its vertical velocity.
pub fn apply_gravity(velocity: &mut Vec3, gravity: f32, on_ground: bool, dt: f32) {
    debug_assert!(dt.is_finite(), "non-finite dt: {dt}");
    if !on_ground {
        velocity.y -= gravity * dt;
    }
}

/// Horizontal velocity the player asks for.
///
/// Input is projected onto the camera's flattened forward and right
/// vectors. The combined direction is capped at unit length so diagonal
/// movement is not faster than straight movement.
pub fn wish_velocity(camera: &Camera, input: MoveInput, move_speed: f32) -> Vec3 {
    let [forward, right, _] = input;
    let direction = camera.flat_forward() * forward + camera.right() * right;
    let length = direction.length();
    let direction = if length > 1.0 {
        direction / length
    } else {
        direction
    };
    direction * move_speed
}

/// Full velocity update for one tick.
///
/// Gravity first, then horizontal control, then a jump impulse if grounded
/// and `up` is pressed.
pub fn integrate_velocity(
    velocity: Vec3,
    camera: &Camera,
    input: MoveInput,
    params: &MotionParams,
    on_ground: bool,
    dt: f32,
) -> Vec3 {
    let mut v = velocity;
    apply_gravity(&mut v, params.gravity, on_ground, dt);

    let wish = wish_velocity(camera, input, params.move_speed);
    let carried = Vec3::new(v.x, 0.0, v.z);
    let steer = on_ground || (wish != Vec3::ZERO && carried.length() <= params.move_speed);
    if steer {
        v.x = wish.x;
        v.z = wish.z;
    }

    if on_ground && input[2] > 0.0 {
        v.y = params.jump_speed;
    }
    v
}

/// Tunables read by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn params() -> MotionParams {
        MotionParams {
            move_speed: 5.0,
            gravity: 9.8,
            jump_speed: 4.0,
        }
    }

    #[test]
    fn test_gravity_airborne() {
        let mut v = Vec3::new(1.0, 0.0, 0.0);
        apply_gravity(&mut v, 9.8, false, 0.5);
        assert!((v.y + 4.9).abs() < 1e-6);
        assert_eq!(v.x, 1.0);
    }

    #[test]
    fn test_gravity_skipped_when_grounded() {
        let mut v = Vec3::new(0.0, 0.0, 0.0);
        apply_gravity(&mut v, 9.8, true, 0.5);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_free_fall_matches_closed_form_velocity() {
        let mut v = Vec3::ZERO;
        let dt = 0.01;
        for _ in 0..100 {
            apply_gravity(&mut v, 9.8, false, dt);
        }
        // v = g * t after 1 second
        assert!((v.y + 9.8).abs() < 1e-3, "got vy={}", v.y);
    }

    #[test]
    fn test_wish_follows_yaw() {
        let mut cam = Camera::default();
        let forward = wish_velocity(&cam, [1.0, 0.0, 0.0], 5.0);
        assert!((forward - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);

        cam.yaw = FRAC_PI_2;
        let forward = wish_velocity(&cam, [1.0, 0.0, 0.0], 5.0);
        assert!((forward - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_wish_ignores_pitch() {
        let mut cam = Camera::default();
        cam.pitch = 1.3;
        let v = wish_velocity(&cam, [1.0, 0.0, 0.0], 5.0);
        assert_eq!(v.y, 0.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_not_faster() {
        let cam = Camera::default();
        let v = wish_velocity(&cam, [1.0, 1.0, 0.0], 5.0);
        assert!((v.length() - 5.0).abs() < 1e-5, "got |v|={}", v.length());
    }

    #[test]
    fn test_grounded_replaces_horizontal() {
        let cam = Camera::default();
        let v = integrate_velocity(
            Vec3::new(9.0, 0.0, 9.0),
            &cam,
            [0.0, 1.0, 0.0],
            &params(),
            true,
            0.1,
        );
        assert!((v - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5, "got {v:?}");
    }

    #[test]
    fn test_grounded_without_input_stops() {
        let cam = Camera::default();
        let v = integrate_velocity(Vec3::new(3.0, 0.0, -1.0), &cam, [0.0; 3], &params(), true, 0.1);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_airborne_keeps_fling_momentum() {
        // Faster than walking: input must not cancel the carried speed
        let cam = Camera::default();
        let v = integrate_velocity(
            Vec3::new(9.0, -2.0, 9.0),
            &cam,
            [0.0, 1.0, 0.0],
            &params(),
            false,
            0.1,
        );
        assert_eq!(v.x, 9.0);
        assert_eq!(v.z, 9.0);
        assert!((v.y - (-2.0 - 0.98)).abs() < 1e-5);
    }

    #[test]
    fn test_airborne_steering_below_walk_speed() {
        let cam = Camera::default();
        let v = integrate_velocity(
            Vec3::new(1.0, 0.0, 0.0),
            &cam,
            [1.0, 0.0, 0.0],
            &params(),
            false,
            0.1,
        );
        assert!(v.x.abs() < 1e-5);
        assert!((v.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let cam = Camera::default();
        let grounded = integrate_velocity(Vec3::ZERO, &cam, [0.0, 0.0, 1.0], &params(), true, 0.1);
        assert_eq!(grounded.y, 4.0);

        let airborne = integrate_velocity(Vec3::ZERO, &cam, [0.0, 0.0, 1.0], &params(), false, 0.1);
        assert!(airborne.y < 0.0);
    }
}
