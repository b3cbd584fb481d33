//! # Portal Core
//!
//! First-person movement and portal physics: a player walking, falling and
//! colliding with static boxes, and teleporting through a linked pair of
//! portals with position, momentum and view carried across.
//!
//! ## Architecture
//!
//! - `types`: Shared math re-exports, collision results and tuning constants
//! - `collision`: Swept AABB detection and axis-separated resolution
//! - `camera`: Pitch/yaw orientation and view matrices
//! - `integrator`: Gravity, walking and jumping (forward Euler)
//! - `player`: Per-tick look, move and ground state
//! - `portal`: Portal frames, the blue/orange pair and the teleport remap
//! - `config`: YAML-based player and portal tuning loader
//! - `simulation`: Main orchestrator

pub mod camera;
pub mod collision;
pub mod config;
pub mod integrator;
pub mod player;
pub mod portal;
pub mod simulation;
pub mod types;
