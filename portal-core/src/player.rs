//! First-person player: look, gravity, walking and collision response.
//!
//! One call to [`Player::update`] is one simulation tick, and always runs in
//! this order:
//!
//! 1. Mouse look (yaw wraps, pitch clamps)
//! 2. Gravity, then horizontal input (see `integrator`)
//! 3. Per-axis sweep against the world boxes: X, Z, then Y
//! 4. Grounded state recomputed from this tick's contacts
//!
//! Axes are swept one at a time so that a wall blocking X does not also
//! cancel sliding along Z, and the floor does not eat horizontal motion.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::camera::{wrap_angle, Camera};
use crate::collision::{first_hit, player_box, resolve, Aabb};
use crate::config::PlayerConfig;
use crate::integrator::{self, MotionParams, MoveInput};
use crate::types::{constants, Axis, CollisionResult, Vec3};

/// Raw mouse movement for one tick, `[dx, dy]` in device units.
///
/// Positive `dx` turns right, positive `dy` looks down (screen coordinates).
pub type MouseDelta = [f32; 2];

/// Whether the player stood on something at the end of the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    Airborne,
    Grounded,
}

/// What happened during one [`Player::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveReport {
    /// Velocity after integration, before any collision zeroed components
    pub intended_velocity: Vec3,
    /// Became grounded this tick
    pub landed: bool,
    /// Number of axis passes that hit something
    pub contacts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub camera: Camera,
    pub velocity: Vec3,
    pub move_speed: f32,
    /// Radians per mouse unit
    pub mouse_sensitivity: f32,
    pub on_ground: bool,
    pub gravity: f32,
    pub jump_speed: f32,
    pub radius: f32,
    pub height: f32,
}

impl Player {
    /// Player with default tuning, eye at `start`.
    pub fn new(start: Vec3) -> Self {
        Self::from_config(start, &PlayerConfig::default())
    }

    pub fn from_config(start: Vec3, config: &PlayerConfig) -> Self {
        Self {
            camera: Camera::new(start),
            velocity: Vec3::ZERO,
            move_speed: config.move_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            on_ground: false,
            gravity: config.gravity,
            jump_speed: config.jump_speed,
            radius: config.radius,
            height: config.height,
        }
    }

    /// Eye position.
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    /// The box used for collision this tick.
    pub fn collision_box(&self) -> Aabb {
        player_box(self.camera.position, self.radius, self.height)
    }

    pub fn state(&self) -> MovementState {
        if self.on_ground {
            MovementState::Grounded
        } else {
            MovementState::Airborne
        }
    }

    /// Apply mouse movement to the camera.
    pub fn look(&mut self, mouse_delta: MouseDelta) {
        let [dx, dy] = mouse_delta;
        self.camera.yaw = wrap_angle(self.camera.yaw - dx * self.mouse_sensitivity);
        self.camera.pitch = (self.camera.pitch - dy * self.mouse_sensitivity)
            .clamp(-constants::PITCH_LIMIT, constants::PITCH_LIMIT);
    }

    /// Integrate gravity alone for `dt`.
    pub fn apply_gravity(&mut self, dt: f32) {
        integrator::apply_gravity(&mut self.velocity, self.gravity, self.on_ground, dt);
    }

    /// Advance one tick against the static `boxes`.
    pub fn update(
        &mut self,
        dt: f32,
        move_input: MoveInput,
        mouse_delta: MouseDelta,
        boxes: &[Aabb],
    ) -> MoveReport {
        debug_assert!(dt.is_finite() && dt >= 0.0, "bad dt: {dt}");

        self.look(mouse_delta);

        let was_grounded = self.on_ground;
        self.velocity = integrator::integrate_velocity(
            self.velocity,
            &self.camera,
            move_input,
            &self.motion_params(),
            was_grounded,
            dt,
        );
        let intended_velocity = self.velocity;

        let mut contacts = 0;
        let mut grounded = false;

        // Only the vertical pass decides whether the player is grounded
        for axis in [Axis::X, Axis::Z] {
            let displacement = axis.isolate(self.velocity) * dt;
            if self.move_axis(displacement, boxes, true).is_some() {
                contacts += 1;
            }
        }

        // Standing still on the ground: probe down so the floor contact is
        // seen this tick too
        let vertical = self.velocity.y * dt;
        let probing = was_grounded && vertical == 0.0;
        let displacement = if probing {
            Vec3::new(0.0, -constants::GROUND_PROBE, 0.0)
        } else {
            Vec3::new(0.0, vertical, 0.0)
        };
        if let Some(hit) = self.move_axis(displacement, boxes, !probing) {
            contacts += 1;
            grounded |= is_floor(&hit);
        }

        self.on_ground = grounded;
        if grounded {
            self.velocity.y = 0.0;
        }

        let landed = grounded && !was_grounded;
        if landed {
            debug!("player landed at {:?}", self.camera.position);
        }

        MoveReport {
            intended_velocity,
            landed,
            contacts,
        }
    }

    /// Move by `displacement`, stopping at the first box in the way.
    ///
    /// On a hit the box is pushed out along the contact normal and the
    /// velocity component along that normal is zeroed. When nothing is hit
    /// the full displacement is applied only if `commit_miss` is set.
    fn move_axis(
        &mut self,
        displacement: Vec3,
        boxes: &[Aabb],
        commit_miss: bool,
    ) -> Option<CollisionResult> {
        let current = self.collision_box();
        let Some((index, hit)) = first_hit(&current, displacement, boxes) else {
            if commit_miss {
                self.camera.position += displacement;
            }
            return None;
        };

        let end = current.translated(displacement);
        let center = resolve(&end, &boxes[index], &hit);
        self.camera.position += center - current.center();
        self.velocity -= hit.normal * self.velocity.dot(hit.normal);

        trace!("blocked by box {} normal={:?}", index, hit.normal);
        Some(hit)
    }

    fn motion_params(&self) -> MotionParams {
        MotionParams {
            move_speed: self.move_speed,
            gravity: self.gravity,
            jump_speed: self.jump_speed,
        }
    }
}

fn is_floor(hit: &CollisionResult) -> bool {
    hit.normal.y > constants::GROUND_NORMAL_THRESHOLD
}

// =============================================================================
// Tests
// =============================================================================
