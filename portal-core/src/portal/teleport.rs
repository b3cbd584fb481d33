//! Remapping bodies and views across a linked portal pair.
//!
//! A point is carried from the entry portal to the exit portal by
//!
//! ```text
//! world --entry⁻¹--> entry-local --FLIP--> exit-local --exit--> world
//! ```
//!
//! FLIP is a half turn about local up. Without it, motion into the entry
//! portal (local -Z) would come out of the exit portal still heading into
//! its surface. Every quantity (position, velocity, look direction, view
//! matrix) goes through the same composed matrix, so a teleport from A to B
//! followed by one from B to A is the identity.
//!
//! The caller checks that the pair is linked before remapping. Passing an
//! inactive portal is a contract violation.

use crate::camera::Camera;
use crate::portal::frame::Portal;
use crate::types::{Mat4, Vec3};

/// Half turn about local +Y: `(x, y, z) -> (-x, y, -z)`.
pub const FLIP: Mat4 = Mat4::from_cols(
    glam::Vec4::NEG_X,
    glam::Vec4::Y,
    glam::Vec4::NEG_Z,
    glam::Vec4::W,
);

/// World-to-world transform taking the entry side to the exit side.
pub fn teleport_matrix(entry: &Portal, exit: &Portal) -> Mat4 {
    debug_assert!(
        entry.is_active() && exit.is_active(),
        "teleport through an unlinked portal pair"
    );
    exit.transform() * FLIP * entry.transform().inverse()
}

/// Where `entry_position` comes out of `exit`.
///
/// `velocity` is rotated in place by the same transform, so speed is kept
/// and motion into the entry portal becomes motion out of the exit portal.
pub fn calculate_exit_position(
    entry: &Portal,
    exit: &Portal,
    entry_position: Vec3,
    velocity: &mut Vec3,
) -> Vec3 {
    let m = teleport_matrix(entry, exit);
    *velocity = m.transform_vector3(*velocity);
    m.transform_point3(entry_position)
}

/// Pitch and yaw after looking through the pair.
///
/// The look direction is remapped and pitch/yaw re-derived from it, so pitch
/// comes back clamped and yaw wrapped into [0, 2π).
pub fn calculate_exit_rotation(entry: &Portal, exit: &Portal, pitch: f32, yaw: f32) -> (f32, f32) {
    let forward = Camera {
        position: Vec3::ZERO,
        pitch,
        yaw,
    }
    .forward();
    let remapped = teleport_matrix(entry, exit).transform_vector3(forward);
    Camera::orientation_from_forward(remapped)
}

/// View matrix of the virtual camera that renders what is seen through
/// `entry`, given the real camera's `view`.
pub fn portal_view_matrix(entry: &Portal, exit: &Portal, view: Mat4) -> Mat4 {
    view * entry.transform() * FLIP * exit.transform().inverse()
}

// =============================================================================
// Tests
// =============================================================================
