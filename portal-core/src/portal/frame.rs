//! A single portal: its placement frame, volume and containment tests.
//!
//! A portal is a `width` x `height` rectangle centered on `position` and
//! lying in the plane whose normal is `normal`. Its local frame has
//!
//! - `+X` = `right`, along the width
//! - `+Y` = `up`, along the height
//! - `+Z` = `normal`, out of the surface the portal is placed on
//!
//! `transform` and `bounding_box` are derived from the placement and are
//! rebuilt whenever the placement changes, which is why the fields are only
//! reachable through accessors.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::types::{constants, Mat4, Vec3};

/// Which end of the pair a portal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalColor {
    Blue,
    Orange,
}

impl PortalColor {
    pub const ALL: [PortalColor; 2] = [PortalColor::Blue, PortalColor::Orange];

    /// The color at the other end of the pair.
    pub fn opposite(self) -> Self {
        match self {
            PortalColor::Blue => PortalColor::Orange,
            PortalColor::Orange => PortalColor::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    active: bool,
    color: PortalColor,
    position: Vec3,
    normal: Vec3,
    up: Vec3,
    right: Vec3,
    width: f32,
    height: f32,
    transform: Mat4,
    bounding_box: Aabb,
}

impl Portal {
    /// An unplaced portal slot.
    pub fn inactive(color: PortalColor) -> Self {
        let mut portal = Self {
            active: false,
            color,
            position: Vec3::ZERO,
            normal: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            width: constants::DEFAULT_PORTAL_WIDTH,
            height: constants::DEFAULT_PORTAL_HEIGHT,
            transform: Mat4::IDENTITY,
            bounding_box: Aabb::from_min_max(Vec3::ZERO, Vec3::ZERO),
        };
        portal.update_transform();
        portal
    }

    /// An active portal of default size on a surface facing `normal`.
    pub fn new(color: PortalColor, position: Vec3, normal: Vec3) -> Self {
        Self::with_size(
            color,
            position,
            normal,
            constants::DEFAULT_PORTAL_WIDTH,
            constants::DEFAULT_PORTAL_HEIGHT,
        )
    }

    /// An active portal with explicit extents.
    pub fn with_size(
        color: PortalColor,
        position: Vec3,
        normal: Vec3,
        width: f32,
        height: f32,
    ) -> Self {
        debug_assert!(
            width > 0.0 && height > 0.0,
            "portal extents must be positive: {width} x {height}"
        );
        let mut portal = Self::inactive(color);
        portal.width = width;
        portal.height = height;
        portal.place(position, normal);
        portal
    }

    /// Move the portal onto a new surface point and activate it.
    pub fn place(&mut self, position: Vec3, normal: Vec3) {
        let (right, up, normal) = portal_frame(normal);
        self.position = position;
        self.normal = normal;
        self.up = up;
        self.right = right;
        self.active = true;
        self.update_transform();
        debug!(
            "{:?} portal placed at {:?} facing {:?}",
            self.color, position, normal
        );
    }

    /// Change the portal's extents, keeping its placement.
    pub fn resize(&mut self, width: f32, height: f32) {
        debug_assert!(width > 0.0 && height > 0.0, "portal extents must be positive");
        self.width = width;
        self.height = height;
        self.update_transform();
    }

    /// Remove the portal from play. Geometry is kept for the next placement.
    pub fn deactivate(&mut self) {
        if self.active {
            debug!("{:?} portal deactivated", self.color);
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn color(&self) -> PortalColor {
        self.color
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Local-to-world frame, columns (right, up, normal, position).
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    /// Direction a body leaves the portal in.
    pub fn forward(&self) -> Vec3 {
        self.normal
    }

    /// Rebuild `transform` and `bounding_box` from the placement.
    pub fn update_transform(&mut self) {
        self.transform = calculate_transform(self.position, self.normal, self.up);

        let half_w = self.right * (self.width * 0.5);
        let half_h = self.up * (self.height * 0.5);
        let depth = self.normal * constants::PORTAL_DEPTH_EPSILON;
        let corners = [-1.0_f32, 1.0].into_iter().flat_map(move |sw| {
            [-1.0_f32, 1.0].into_iter().flat_map(move |sh| {
                [-1.0_f32, 1.0]
                    .into_iter()
                    .map(move |sd| half_w * sw + half_h * sh + depth * sd)
            })
        });
        self.bounding_box = Aabb::enclosing(corners.map(|c| self.position + c));
    }

    /// World point in the portal's local frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.transform.inverse().transform_point3(point)
    }

    /// Local point in world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.transform.transform_point3(local)
    }

    /// Whether `point` lies on the portal rectangle, within
    /// `PORTAL_DEPTH_EPSILON` of its plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.to_local(point);
        self.within_rectangle(local) && local.z.abs() <= constants::PORTAL_DEPTH_EPSILON
    }

    /// Whether a body's box touches the portal's volume with its center in
    /// front of or behind the portal rectangle.
    pub fn overlaps_box(&self, body: &Aabb) -> bool {
        self.bounding_box.intersects(body) && self.within_rectangle(self.to_local(body.center()))
    }

    fn within_rectangle(&self, local: Vec3) -> bool {
        local.x.abs() <= self.width * 0.5 && local.y.abs() <= self.height * 0.5
    }
}

/// Orthonormal right-handed frame `(right, up, normal)` for a surface
/// normal.
///
/// `up` starts from world up. For floors and ceilings, where the normal is
/// nearly parallel to world up, world -Z is used instead so the cross
/// product never collapses.
pub fn portal_frame(normal: Vec3) -> (Vec3, Vec3, Vec3) {
    debug_assert!(
        normal.length_squared() > constants::EPSILON,
        "zero-length portal normal"
    );
    let normal = normal.normalize();
    let reference = if normal.dot(Vec3::Y).abs() > constants::PARALLEL_THRESHOLD {
        Vec3::NEG_Z
    } else {
        Vec3::Y
    };
    let right = reference.cross(normal).normalize();
    let up = normal.cross(right);
    (right, up, normal)
}

/// Rigid frame with basis columns (right, up, normal) and translation
/// `position`.
///
/// `up` is re-orthogonalized against `normal`, so it only needs to be
/// roughly perpendicular.
pub fn calculate_transform(position: Vec3, normal: Vec3, up: Vec3) -> Mat4 {
    let normal = normal.normalize();
    let right = up.cross(normal).normalize();
    let up = normal.cross(right);
    Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        normal.extend(0.0),
        position.extend(1.0),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn sample_normals() -> Vec<Vec3> {
        vec![
            Vec3::Z,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.3, 0.8, -0.5),
            Vec3::new(0.001, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_frame_is_orthonormal_right_handed() {
        for n in sample_normals() {
            let (right, up, normal) = portal_frame(n);
            assert!((right.length() - 1.0).abs() < 1e-5, "right not unit for {n:?}");
            assert!((up.length() - 1.0).abs() < 1e-5, "up not unit for {n:?}");
            assert!(right.dot(up).abs() < 1e-5);
            assert!(right.dot(normal).abs() < 1e-5);
            assert!(up.dot(normal).abs() < 1e-5);
            assert!(approx(right.cross(up), normal), "left-handed for {n:?}");
            assert!(approx(normal, n.normalize()));
        }
    }

    #[test]
    fn test_wall_frame_keeps_world_up() {
        let (right, up, _) = portal_frame(Vec3::Z);
        assert!(approx(up, Vec3::Y));
        assert!(approx(right, Vec3::X));
    }

    #[test]
    fn test_floor_frame_uses_fallback() {
        let (right, up, normal) = portal_frame(Vec3::Y);
        assert!(approx(normal, Vec3::Y));
        assert!(approx(up, Vec3::NEG_Z));
        assert!(approx(right, Vec3::X));
    }

    #[test]
    fn test_transform_columns() {
        let portal = Portal::new(PortalColor::Blue, Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_X);
        let m = portal.transform();
        assert!(approx(m.x_axis.truncate(), portal.right()));
        assert!(approx(m.y_axis.truncate(), portal.up()));
        assert!(approx(m.z_axis.truncate(), portal.normal()));
        assert!(approx(m.w_axis.truncate(), portal.position()));
    }

    #[test]
    fn test_local_round_trip() {
        for n in sample_normals() {
            let portal = Portal::new(PortalColor::Orange, Vec3::new(-4.0, 1.5, 7.0), n);
            for p in [
                Vec3::ZERO,
                Vec3::new(3.0, -2.0, 1.0),
                Vec3::new(-4.0, 1.5, 7.0),
                Vec3::new(100.0, 50.0, -20.0),
            ] {
                let back = portal.to_world(portal.to_local(p));
                assert!((back - p).length() < 1e-3, "{p:?} -> {back:?} for {n:?}");
            }
        }
    }

    #[test]
    fn test_contains_point() {
        let portal = Portal::new(PortalColor::Blue, Vec3::new(0.0, 1.5, -5.0), Vec3::Z);

        assert!(portal.contains_point(portal.position()));
        assert!(portal.contains_point(Vec3::new(0.9, 2.9, -5.0)));
        assert!(portal.contains_point(Vec3::new(0.0, 1.5, -5.0 + 0.04)));

        assert!(!portal.contains_point(Vec3::new(1.1, 1.5, -5.0)), "outside width");
        assert!(!portal.contains_point(Vec3::new(0.0, 3.1, -5.0)), "outside height");
        assert!(!portal.contains_point(Vec3::new(0.0, 1.5, -4.5)), "off the plane");
    }

    #[test]
    fn test_bounding_box_is_thin_along_normal() {
        let portal = Portal::new(PortalColor::Blue, Vec3::new(0.0, 1.5, -5.0), Vec3::Z);
        let b = portal.bounding_box();

        assert!(b.contains_point(portal.position()));
        assert!((b.size().z - 2.0 * constants::PORTAL_DEPTH_EPSILON).abs() < 1e-5);
        assert!((b.size().x - portal.width()).abs() < 1e-5);
        assert!((b.size().y - portal.height()).abs() < 1e-5);
    }

    #[test]
    fn test_placement_rebuilds_derived_state() {
        let mut portal = Portal::new(PortalColor::Blue, Vec3::ZERO, Vec3::Z);
        let old_box = portal.bounding_box();

        portal.place(Vec3::new(10.0, 0.0, 0.0), Vec3::X);
        assert!(approx(portal.transform().w_axis.truncate(), Vec3::new(10.0, 0.0, 0.0)));
        assert_ne!(portal.bounding_box(), old_box);
        assert!(portal.contains_point(Vec3::new(10.0, 0.0, 0.0)));

        portal.resize(4.0, 1.0);
        assert!((portal.bounding_box().size().z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_deactivate() {
        let mut portal = Portal::new(PortalColor::Orange, Vec3::ZERO, Vec3::Z);
        assert!(portal.is_active());
        portal.deactivate();
        assert!(!portal.is_active());
        // Geometry stays put
        assert_eq!(portal.position(), Vec3::ZERO);

        assert!(!Portal::inactive(PortalColor::Blue).is_active());
    }

    #[test]
    fn test_overlaps_box() {
        let portal = Portal::new(PortalColor::Blue, Vec3::new(0.0, 1.5, 0.0), Vec3::Z);

        // Body pressed against the wall in front of the portal
        let touching = Aabb::from_min_max(Vec3::new(-0.3, 0.0, 0.001), Vec3::new(0.3, 1.8, 0.601));
        assert!(portal.overlaps_box(&touching));

        // Same body, beside the portal
        let beside = touching.translated(Vec3::new(3.0, 0.0, 0.0));
        assert!(!portal.overlaps_box(&beside));

        // Standing back from the wall
        let away = touching.translated(Vec3::new(0.0, 0.0, 1.0));
        assert!(!portal.overlaps_box(&away));
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(PortalColor::Blue.opposite(), PortalColor::Orange);
        assert_eq!(PortalColor::Orange.opposite(), PortalColor::Blue);
    }
}
