//! Core types shared by the collision, player and portal modules.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Angles: radians
//!
//! Coordinate system is right-handed with +Y up. A camera with zero pitch
//! and yaw looks down -Z.

use serde::{Deserialize, Serialize};

pub use glam::{Mat4, Quat, Vec3};

// =============================================================================
// Axis
// =============================================================================

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a `Vec3`.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Positive unit vector along this axis.
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Vector with only this axis' component of `v` kept.
    pub fn isolate(self, v: Vec3) -> Vec3 {
        let mut out = Vec3::ZERO;
        out[self.index()] = v[self.index()];
        out
    }
}

// =============================================================================
// Collision Result
// =============================================================================

/// Outcome of a swept AABB test.
///
/// `normal`, `penetration_depth`, `contact_point` and `time` are only
/// meaningful when `collided` is true. The normal is always a signed unit
/// axis vector pointing away from the stationary box.
///
/// `penetration_depth` is measured on the box at the *end* of the sweep:
/// it is the distance the moved box must be pushed along `normal` to stop
/// overlapping the stationary box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    pub collided: bool,
    pub normal: Vec3,
    pub penetration_depth: f32,
    pub contact_point: Vec3,
    /// Fraction of the sweep in [0, 1] at which contact begins.
    pub time: f32,
}

impl CollisionResult {
    /// The "nothing hit" outcome.
    pub const fn none() -> Self {
        Self {
            collided: false,
            normal: Vec3::ZERO,
            penetration_depth: 0.0,
            contact_point: Vec3::ZERO,
            time: 1.0,
        }
    }

    /// Axis the normal lies on, if any.
    pub fn axis(&self) -> Option<Axis> {
        if !self.collided {
            return None;
        }
        Axis::ALL
            .into_iter()
            .find(|axis| self.normal[axis.index()] != 0.0)
    }
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self::none()
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Tuning constants used across the core.
pub mod constants {
    /// Small value for floating-point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Distance from the top of the player box down to the eye (m)
    pub const EYE_OFFSET: f32 = 0.1;

    /// Extra separation left after pushing a box out of another (m)
    pub const RESOLVE_MARGIN: f32 = 0.001;

    /// Half-thickness of a portal's volume along its normal (m)
    pub const PORTAL_DEPTH_EPSILON: f32 = 0.05;

    /// Minimum upward normal component for a contact to count as floor
    pub const GROUND_NORMAL_THRESHOLD: f32 = 0.7;

    /// Downward probe distance used to keep a standing player grounded (m)
    pub const GROUND_PROBE: f32 = 0.05;

    /// Pitch is clamped to ±89° so the view never flips over the pole
    pub const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    /// Above this |normal·up| a portal frame switches reference axis
    pub const PARALLEL_THRESHOLD: f32 = 0.99;

    /// Default portal extents (m)
    pub const DEFAULT_PORTAL_WIDTH: f32 = 2.0;
    pub const DEFAULT_PORTAL_HEIGHT: f32 = 3.0;

    /// Default player parameters
    pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
    pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.002;
    pub const DEFAULT_GRAVITY: f32 = 9.8;
    pub const DEFAULT_JUMP_SPEED: f32 = 5.0;
    pub const DEFAULT_RADIUS: f32 = 0.3;
    pub const DEFAULT_HEIGHT: f32 = 1.8;
}

// =============================================================================
// Tests
// =============================================================================
