//! Penetration resolution.
//!
//! Pushes a box out of a stationary box along the collision normal only.
//! Motion on the other two axes is left exactly as it was, so a body pressed
//! against a wall never drifts sideways unless its own input moves it.

use crate::collision::aabb::Aabb;
use crate::types::{constants, CollisionResult, Vec3};

/// Corrected center for `moving` after a collision with `stationary`.
///
/// `moving` is the box at the position it tried to reach (the end of the
/// sweep). The box is displaced along `result.normal` by the penetration
/// depth plus `RESOLVE_MARGIN`. If the boxes given need more than the
/// reported depth to separate, the larger distance is used.
pub fn resolve(moving: &Aabb, stationary: &Aabb, result: &CollisionResult) -> Vec3 {
    let center = moving.center();
    if !result.collided {
        return center;
    }

    let depth = result
        .penetration_depth
        .max(moving.push_out_distance(stationary, result.normal));

    center + result.normal * (depth + constants::RESOLVE_MARGIN)
}

// =============================================================================
// Tests
// =============================================================================
