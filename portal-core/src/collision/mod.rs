//! Collision detection and resolution against static box geometry.
//!
//! This module handles:
//! - **Boxes**: `Aabb` construction, containment, intersection and the
//!   player's box
//! - **Detection**: Finding when and along which axis a moving box first
//!   touches a stationary one (swept AABB)
//! - **Resolution**: Pushing the moved box back out along that axis only
//!
//! ## Swept AABB Algorithm
//!
//! Instead of checking whether the box overlaps a wall after moving (which
//! fails at high speeds), we check whether its path crosses the wall during
//! the tick.
//!
//! ```text
//! t=0                    t=1
//! ┌──┐ ─────────────────▶┌──┐
//! └──┘        ║          └──┘
//!             ║ wall
//!          t_entry
//! ```
//!
//! Each axis gives an interval of t during which the boxes overlap on that
//! axis; the boxes touch when all three intervals overlap.

pub mod aabb;
pub mod detection;
pub mod resolution;

pub use aabb::*;
pub use detection::*;
pub use resolution::*;
