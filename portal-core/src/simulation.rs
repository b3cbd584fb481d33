//! Per-tick driver tying the player to the portal pair.
//!
//! One call to [`Simulation::step`] runs, in order:
//!
//! ```text
//! look -> gravity + movement -> collision -> grounded -> teleport check
//! ```
//!
//! The world's boxes are borrowed for the tick only.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::collision::{player_box, Aabb};
use crate::config::{PlayerConfig, PortalConfig};
use crate::integrator::MoveInput;
use crate::player::{MouseDelta, Player};
use crate::portal::{
    calculate_exit_position, calculate_exit_rotation, Portal, PortalColor, PortalPair,
};
use crate::types::{constants, Vec3};

/// Input sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// `[forward, right, up]`
    pub move_input: MoveInput,
    /// Raw mouse `[dx, dy]`
    pub mouse_delta: MouseDelta,
}

/// What happened during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub landed: bool,
    pub grounded: bool,
    /// Color of the portal entered, if the player teleported
    pub teleported: Option<PortalColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub player: Player,
    pub portals: PortalPair,
    pub portal_config: PortalConfig,
    spawn: Vec3,
    time: f32,
}

impl Simulation {
    /// Default player at `spawn` with both portals unplaced.
    pub fn new(spawn: Vec3) -> Self {
        Self::with_config(spawn, &PlayerConfig::default(), PortalConfig::default())
    }

    pub fn with_config(spawn: Vec3, player: &PlayerConfig, portal_config: PortalConfig) -> Self {
        Self {
            player: Player::from_config(spawn, player),
            portals: PortalPair::new(),
            portal_config,
            spawn,
            time: 0.0,
        }
    }

    /// Simulated seconds since creation or the last reset.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Put the player back at spawn, at rest. Portals are left in place.
    pub fn reset(&mut self) {
        self.player.camera = Camera::new(self.spawn);
        self.player.velocity = Vec3::ZERO;
        self.player.on_ground = false;
        self.time = 0.0;
    }

    /// Place (or move) a portal, sized by the portal config.
    pub fn place_portal(&mut self, color: PortalColor, position: Vec3, normal: Vec3) {
        self.portals
            .place_sized(color, position, normal, &self.portal_config);
    }

    pub fn remove_portal(&mut self, color: PortalColor) {
        self.portals.deactivate(color);
    }

    /// Advance one tick against the static `boxes`.
    pub fn step(&mut self, dt: f32, input: &TickInput, boxes: &[Aabb]) -> TickReport {
        let moved = self
            .player
            .update(dt, input.move_input, input.mouse_delta, boxes);
        let teleported = self.try_teleport(moved.intended_velocity);
        self.time += dt;

        TickReport {
            landed: moved.landed,
            grounded: self.player.on_ground,
            teleported,
        }
    }

    /// Run `steps` ticks with the same input.
    pub fn step_n(&mut self, dt: f32, steps: usize, input: &TickInput, boxes: &[Aabb]) {
        for _ in 0..steps {
            self.step(dt, input, boxes);
        }
    }

    /// Teleport the player if they are moving into an active portal.
    ///
    /// `velocity` is the velocity before collision, so walking into a portal
    /// on a wall still counts as moving into it after the wall stopped the
    /// player.
    fn try_teleport(&mut self, velocity: Vec3) -> Option<PortalColor> {
        if !self.portals.linked() {
            return None;
        }

        let body = self.player.collision_box();
        for color in PortalColor::ALL {
            let entry = self.portals.get(color);
            if velocity.dot(entry.normal()) >= 0.0 || !entry.overlaps_box(&body) {
                continue;
            }
            let exit = self.portals.get_destination(color);

            let mut exit_velocity = velocity;
            let exit_eye =
                calculate_exit_position(entry, exit, self.player.camera.position, &mut exit_velocity);
            let (pitch, yaw) =
                calculate_exit_rotation(entry, exit, self.player.camera.pitch, self.player.camera.yaw);

            // The flip leaves the body behind the exit surface; lift the
            // whole box clear of it
            let exit_body = player_box(exit_eye, self.player.radius, self.player.height);
            let lift = exit_clearance(&exit_body, exit);
            self.player.camera.position = exit_eye + exit.normal() * lift;
            self.player.camera.pitch = pitch;
            self.player.camera.yaw = yaw;
            self.player.velocity = exit_velocity;
            self.player.on_ground = false;

            debug!(
                "teleported {:?} -> {:?}, now at {:?} moving {:?}",
                color,
                color.opposite(),
                self.player.camera.position,
                exit_velocity
            );
            return Some(color);
        }
        None
    }
}

/// Distance `body` must move along the portal normal to lie entirely in
/// front of the portal plane, plus the resolve margin. Zero when it already
/// does.
fn exit_clearance(body: &Aabb, exit: &Portal) -> f32 {
    let normal = exit.normal();
    let center_distance = (body.center() - exit.position()).dot(normal);
    let reach = body.half_extents().dot(normal.abs());
    (constants::RESOLVE_MARGIN - (center_distance - reach)).max(0.0)
}

// =============================================================================
// Tests
// =============================================================================
