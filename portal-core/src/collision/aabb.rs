//! Axis-aligned bounding boxes.
//!
//! Boxes are plain values: every helper returns a new box instead of mutating.
//! The invariant `min <= max` on every axis is checked with `debug_assert!`
//! at construction; a malformed box is a caller contract violation.

use serde::{Deserialize, Serialize};

use crate::types::{constants, Axis, Vec3};

/// An axis-aligned box, one closed interval per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered on `center` reaching `half_extents` in each direction.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        debug_assert!(
            half_extents.cmpge(Vec3::ZERO).all(),
            "negative half extents: {half_extents:?}"
        );
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Box from its two corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "min {min:?} exceeds max {max:?}");
        Self { min, max }
    }

    /// Smallest box enclosing every point in `points`.
    ///
    /// Returns a degenerate box at the origin when `points` is empty.
    pub fn enclosing(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::from_min_max(Vec3::ZERO, Vec3::ZERO);
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self { min, max }
    }

    /// Inclusive per-axis range test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Separating-axis test over X, Y and Z. Touching faces count as
    /// intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        Axis::ALL.into_iter().all(|axis| self.overlaps_on(other, axis))
    }

    /// Interval overlap on a single axis (inclusive).
    pub fn overlaps_on(&self, other: &Aabb, axis: Axis) -> bool {
        let i = axis.index();
        self.min[i] <= other.max[i] && self.max[i] >= other.min[i]
    }

    /// Interval overlap on a single axis with non-zero depth.
    pub(crate) fn overlaps_strictly_on(&self, other: &Aabb, axis: Axis) -> bool {
        let i = axis.index();
        self.min[i] < other.max[i] && self.max[i] > other.min[i]
    }

    /// Distance `self` must travel along the axis-aligned unit `normal` to
    /// stop overlapping `other`. Negative when already clear by that much.
    pub fn push_out_distance(&self, other: &Aabb, normal: Vec3) -> f32 {
        let (axis, sign) = match Axis::ALL
            .into_iter()
            .find(|axis| normal[axis.index()] != 0.0)
        {
            Some(axis) => (axis, normal[axis.index()].signum()),
            None => return 0.0,
        };
        let i = axis.index();
        if sign < 0.0 {
            self.max[i] - other.min[i]
        } else {
            other.max[i] - self.min[i]
        }
    }

    /// Point of the box nearest to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Grow every face outward by `amount`.
    pub fn expand(&self, amount: f32) -> Self {
        Self::from_min_max(self.min - Vec3::splat(amount), self.max + Vec3::splat(amount))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Width, height and depth.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The same box re-centered on `center`.
    pub fn with_center(&self, center: Vec3) -> Self {
        Self::new(center, self.half_extents())
    }
}

/// Box approximating a standing player.
///
/// The player is a vertical capsule squared off into a box: `radius` on both
/// horizontal axes, `height` tall. `camera_position` is the eye, which sits
/// `EYE_OFFSET` below the top face.
pub fn player_box(camera_position: Vec3, radius: f32, height: f32) -> Aabb {
    debug_assert!(radius > 0.0 && height > 0.0, "degenerate player box");
    let top = camera_position.y + constants::EYE_OFFSET;
    Aabb {
        min: Vec3::new(
            camera_position.x - radius,
            top - height,
            camera_position.z - radius,
        ),
        max: Vec3::new(camera_position.x + radius, top, camera_position.z + radius),
    }
}

/// Eye position for a player box, the inverse of [`player_box`].
pub fn eye_position(player_box: &Aabb) -> Vec3 {
    let center = player_box.center();
    Vec3::new(center.x, player_box.max.y - constants::EYE_OFFSET, center.z)
}

// =============================================================================
// Tests
// =============================================================================
