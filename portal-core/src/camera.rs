//! First-person camera orientation.
//!
//! The orientation is yaw (about world up) followed by pitch (about the
//! resulting local right axis). Composing in that order never introduces
//! roll, so `up` is always world +Y.
//!
//! The camera stores whatever pitch it is given; keeping pitch inside
//! `±PITCH_LIMIT` is the job of whoever writes it (the player, the
//! teleport remap).

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::types::{constants, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation about the local right axis, positive looks up (radians)
    pub pitch: f32,
    /// Rotation about world up, positive turns left (radians)
    pub yaw: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// Yaw then pitch.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation().inverse()) * Mat4::from_translation(-self.position)
    }

    /// Look direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Horizontal right vector.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// World up. There is no roll.
    pub fn up() -> Vec3 {
        Vec3::Y
    }

    /// Forward projected onto the ground plane, used for walking.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Pitch and yaw that look along `direction`.
    ///
    /// Pitch is clamped to the pitch limit and yaw wrapped into [0, 2π).
    /// A zero `direction` yields zero pitch and yaw.
    pub fn orientation_from_forward(direction: Vec3) -> (f32, f32) {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return (0.0, 0.0);
        }
        let pitch = dir
            .y
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-constants::PITCH_LIMIT, constants::PITCH_LIMIT);
        // Looking straight up or down leaves yaw undefined; atan2(0, 0) = 0
        let yaw = wrap_angle((-dir.x).atan2(-dir.z));
        (pitch, yaw)
    }

    /// Point the camera along `direction`.
    pub fn look_along(&mut self, direction: Vec3) {
        let (pitch, yaw) = Self::orientation_from_forward(direction);
        self.pitch = pitch;
        self.yaw = yaw;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_looks_down_neg_z() {
        let cam = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.pitch, 0.0);
        assert_eq!(cam.yaw, 0.0);
        assert!(approx(cam.forward(), Vec3::NEG_Z));
        assert!(approx(cam.right(), Vec3::X));
        assert_eq!(Camera::up(), Vec3::Y);
    }

    #[test]
    fn test_yaw_turns_left() {
        let mut cam = Camera::default();
        cam.yaw = FRAC_PI_2;
        assert!(approx(cam.forward(), Vec3::NEG_X), "got {:?}", cam.forward());
        assert!(approx(cam.right(), Vec3::NEG_Z));
    }

    #[test]
    fn test_pitch_looks_up_without_roll() {
        let mut cam = Camera::default();
        cam.yaw = 1.0;
        cam.pitch = FRAC_PI_4;

        let forward = cam.forward();
        assert!(forward.y > 0.0);
        // Right stays horizontal whatever the pitch
        assert!(cam.right().y.abs() < 1e-6);
        assert!(forward.dot(cam.right()).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let mut cam = Camera::new(Vec3::new(4.0, 1.5, -2.0));
        cam.yaw = 0.7;
        cam.pitch = -0.3;

        let view = cam.view_matrix();
        assert!(approx(view.transform_point3(cam.position), Vec3::ZERO));

        // A point straight ahead lands on the camera's -Z axis
        let ahead = view.transform_point3(cam.position + cam.forward() * 5.0);
        assert!(approx(ahead, Vec3::new(0.0, 0.0, -5.0)), "got {ahead:?}");
    }

    #[test]
    fn test_flat_forward_ignores_pitch() {
        let mut cam = Camera::default();
        cam.yaw = 2.0;
        cam.pitch = 1.2;
        let flat = cam.flat_forward();
        assert_eq!(flat.y, 0.0);
        assert!((flat.length() - 1.0).abs() < 1e-6);

        let horizontal = Vec3::new(cam.forward().x, 0.0, cam.forward().z).normalize();
        assert!(approx(flat, horizontal));
    }

    #[test]
    fn test_orientation_round_trip() {
        for &(pitch, yaw) in &[(0.0, 0.0), (0.5, 1.0), (-1.2, 4.0), (0.1, 6.0)] {
            let cam = Camera {
                position: Vec3::ZERO,
                pitch,
                yaw,
            };
            let (p, y) = Camera::orientation_from_forward(cam.forward());
            assert!((p - pitch).abs() < 1e-4, "pitch {pitch} -> {p}");
            assert!((y - yaw).abs() < 1e-4, "yaw {yaw} -> {y}");
        }
    }

    #[test]
    fn test_orientation_clamps_vertical() {
        let (pitch, _) = Camera::orientation_from_forward(Vec3::Y);
        assert!((pitch - constants::PITCH_LIMIT).abs() < 1e-6);

        let (pitch, _) = Camera::orientation_from_forward(Vec3::NEG_Y);
        assert!((pitch + constants::PITCH_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_look_along() {
        let mut cam = Camera::default();
        let target = Vec3::new(1.0, 0.5, 1.0).normalize();
        cam.look_along(target);
        assert!(approx(cam.forward(), target), "got {:?}", cam.forward());

        // Zero direction resets to the default orientation
        cam.look_along(Vec3::ZERO);
        assert!(approx(cam.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(PI) - PI).abs() < 1e-6);
        assert!(wrap_angle(-1e-9) < TAU);
    }
}
