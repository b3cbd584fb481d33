//! Swept AABB collision detection.
//!
//! Tests a box translating by `velocity` over one tick (t ∈ [0, 1]) against
//! a stationary box, so that a body moving further than its own extents in a
//! single tick still registers the hit.

use log::trace;

use crate::collision::aabb::Aabb;
use crate::types::{constants, Axis, CollisionResult, Vec3};

/// Continuous collision test of `moving` displaced by `velocity` against
/// `stationary`.
///
/// Per axis, computes the interval of t during which the two boxes overlap
/// on that axis. A zero velocity component places no constraint when the
/// boxes already overlap on that axis, and rules out any contact when they
/// do not. Contact begins at the latest per-axis entry and ends at the
/// earliest per-axis exit. The reported normal belongs to the axis with the
/// latest entry (ties go to X, then Y, then Z).
///
/// Boxes that already overlap at t = 0 report an immediate collision whose
/// normal is the axis of least penetration.
pub fn sweep_test(moving: &Aabb, velocity: Vec3, stationary: &Aabb) -> CollisionResult {
    if Axis::ALL
        .into_iter()
        .all(|axis| moving.overlaps_strictly_on(stationary, axis))
    {
        return overlap_result(moving, velocity, stationary);
    }

    let mut entry = f32::NEG_INFINITY;
    let mut exit = f32::INFINITY;
    let mut entry_axis = None;

    for axis in Axis::ALL {
        let i = axis.index();
        let v = velocity[i];

        if v == 0.0 {
            if !moving.overlaps_strictly_on(stationary, axis) {
                return CollisionResult::none();
            }
            continue;
        }

        let (near, far) = if v > 0.0 {
            (stationary.min[i] - moving.max[i], stationary.max[i] - moving.min[i])
        } else {
            (stationary.max[i] - moving.min[i], stationary.min[i] - moving.max[i])
        };
        let axis_entry = near / v;
        let axis_exit = far / v;

        if axis_entry > entry {
            entry = axis_entry;
            entry_axis = Some(axis);
        }
        exit = exit.min(axis_exit);
    }

    let Some(axis) = entry_axis else {
        return CollisionResult::none();
    };
    if entry > exit || !(0.0..=1.0).contains(&entry) {
        return CollisionResult::none();
    }

    let normal = axis.unit() * -velocity[axis.index()].signum();
    let end = moving.translated(velocity);
    let at_contact = moving.translated(velocity * entry);

    CollisionResult {
        collided: true,
        normal,
        penetration_depth: end.push_out_distance(stationary, normal).max(0.0),
        contact_point: stationary.closest_point(at_contact.center()),
        time: entry,
    }
}

/// Immediate collision for boxes that overlap before moving.
fn overlap_result(moving: &Aabb, velocity: Vec3, stationary: &Aabb) -> CollisionResult {
    let mut best = (f32::INFINITY, Vec3::ZERO);
    for axis in Axis::ALL {
        for normal in [-axis.unit(), axis.unit()] {
            let depth = moving.push_out_distance(stationary, normal);
            if depth < best.0 {
                best = (depth, normal);
            }
        }
    }
    let (_, normal) = best;
    let end = moving.translated(velocity);

    CollisionResult {
        collided: true,
        normal,
        penetration_depth: end.push_out_distance(stationary, normal).max(0.0),
        contact_point: stationary.closest_point(moving.center()),
        time: 0.0,
    }
}

/// Earliest hit of `moving` against any of `boxes`.
///
/// Returns the index of the box hit together with the sweep result. When
/// several boxes share the earliest entry time the first one in `boxes`
/// wins, so the outcome depends only on the input order.
pub fn first_hit(
    moving: &Aabb,
    velocity: Vec3,
    boxes: &[Aabb],
) -> Option<(usize, CollisionResult)> {
    let mut earliest: Option<(usize, CollisionResult)> = None;

    for (i, stationary) in boxes.iter().enumerate() {
        let result = sweep_test(moving, velocity, stationary);
        if !result.collided {
            continue;
        }
        let is_earlier = match &earliest {
            Some((_, best)) => result.time < best.time - constants::EPSILON,
            None => true,
        };
        if is_earlier {
            earliest = Some((i, result));
        }
    }

    if let Some((i, hit)) = &earliest {
        trace!("sweep hit box {} at t={:.4} normal={:?}", i, hit.time, hit.normal);
    }
    earliest
}

// =============================================================================
// Tests
// =============================================================================
