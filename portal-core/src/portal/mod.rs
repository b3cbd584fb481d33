//! Portals: placement, pairing and the teleport remap.
//!
//! This module handles:
//! - **Frame**: a portal's orthonormal (right, up, normal) frame, its thin
//!   bounding box and point containment
//! - **Pair**: the blue and orange slots and whether they are linked
//! - **Teleport**: carrying positions, velocities, look directions and view
//!   matrices from one portal of a linked pair to the other

pub mod frame;
pub mod pair;
pub mod teleport;

pub use frame::*;
pub use pair::*;
pub use teleport::*;
