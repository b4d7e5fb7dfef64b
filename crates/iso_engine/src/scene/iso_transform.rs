//! Iso-positioning capability for renderable entities
//!
//! An entity that wants axonometric placement embeds an [`IsoTransform`]
//! and delegates to it from its per-tick update, instead of inheriting the
//! behavior from a base class. The transform holds the logical 3D position,
//! the invalidation flags that keep the projected placement and derived
//! bounds current, and the 2D placement fields the host renderer reads.

use crate::foundation::math::{utils, Point3};
use crate::projection::{depth_of, Projector};
use crate::scene::Cube;

/// Spatial state of an iso-positioned entity
///
/// The public `x`, `y` and `depth` fields are the 2D placement the host
/// renderer consumes every frame. [`IsoTransform::project`] must have run
/// in the same tick before they are read.
#[derive(Debug, Clone)]
pub struct IsoTransform {
    /// Projected screen x, valid after [`IsoTransform::project`]
    pub x: f32,
    /// Projected screen y, valid after [`IsoTransform::project`]
    pub y: f32,
    /// Back-to-front sort key, valid after [`IsoTransform::project`]
    pub depth: f32,

    /// Snap increment for the projected placement; zero disables snapping
    pub snap: f32,

    iso_position: Point3,
    position_changed: bool,
    bounds_changed: bool,
    body_reset: bool,

    width: f32,
    height: f32,
    scale_x: f32,
    scale_y: f32,
    origin_x: f32,
    origin_y: f32,

    iso_bounds: Option<Cube>,
}

impl IsoTransform {
    /// Create a transform at the given iso position.
    ///
    /// Both invalidation flags start set so the first projection and the
    /// first bounds read always compute.
    pub fn new(position: Point3) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            snap: 0.0,
            iso_position: position,
            position_changed: true,
            bounds_changed: true,
            body_reset: false,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: 0.5,
            origin_y: 0.5,
            iso_bounds: None,
        }
    }

    /// Builder: set the render size in pixels
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: set the snap increment
    pub fn with_snap(mut self, snap: f32) -> Self {
        self.snap = snap;
        self
    }

    /// The iso position on the x axis; increasing it moves the entity down
    /// and to the right on screen
    pub fn iso_x(&self) -> f32 {
        self.iso_position.x
    }

    /// The iso position on the y axis; increasing it moves the entity down
    /// and to the left on screen
    pub fn iso_y(&self) -> f32 {
        self.iso_position.y
    }

    /// The iso position on the z axis; increasing it moves the entity
    /// directly up on screen
    pub fn iso_z(&self) -> f32 {
        self.iso_position.z
    }

    /// The full iso position
    pub fn iso_position(&self) -> Point3 {
        self.iso_position
    }

    /// Mutable access to the live iso position.
    ///
    /// Borrowing mutably marks the position and bounds as changed, so any
    /// write through the returned reference is picked up by the next
    /// projection and bounds read.
    pub fn iso_position_mut(&mut self) -> &mut Point3 {
        self.invalidate_position();
        &mut self.iso_position
    }

    /// Set the iso x coordinate.
    ///
    /// Marks both invalidation flags and flags any physics body for reset.
    pub fn set_iso_x(&mut self, value: f32) {
        self.iso_position.x = value;
        self.invalidate_position();
    }

    /// Set the iso y coordinate.
    ///
    /// Marks both invalidation flags and flags any physics body for reset.
    pub fn set_iso_y(&mut self, value: f32) {
        self.iso_position.y = value;
        self.invalidate_position();
    }

    /// Set the iso z coordinate.
    ///
    /// Marks both invalidation flags and flags any physics body for reset.
    pub fn set_iso_z(&mut self, value: f32) {
        self.iso_position.z = value;
        self.invalidate_position();
    }

    /// Set the full iso position.
    ///
    /// Marks both invalidation flags and flags any physics body for reset.
    pub fn set_iso_position(&mut self, position: Point3) {
        self.iso_position = position;
        self.invalidate_position();
    }

    /// Render width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Render height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the render size; invalidates the bounds cache
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.bounds_changed = true;
    }

    /// Horizontal scale factor
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    /// Vertical scale factor
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// Set the scale factors; invalidates the bounds cache
    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.bounds_changed = true;
    }

    /// Relative origin, x component
    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    /// Relative origin, y component
    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    /// Set the relative origin; invalidates the bounds cache
    pub fn set_origin(&mut self, origin_x: f32, origin_y: f32) {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self.bounds_changed = true;
    }

    /// Consume the pending physics body reset signal.
    ///
    /// Returns true when an iso coordinate changed since the last call;
    /// the physics collaborator uses this to re-seat the entity's body.
    pub fn take_body_reset(&mut self) -> bool {
        std::mem::take(&mut self.body_reset)
    }

    /// Perform the axonometric projection from 3D to 2D space.
    ///
    /// No-op unless the position is flagged as changed. Projects the iso
    /// position into `x`/`y`, derives `depth` from the iso coordinates,
    /// snaps the placement when `snap` is positive, and re-arms both
    /// invalidation flags so the next bounds read recomputes.
    ///
    /// Must run once per tick, before the host reads the placement.
    pub fn project(&mut self, projector: &Projector) {
        if !self.position_changed {
            return;
        }

        let projected = projector.project(&self.iso_position);
        self.x = projected.x;
        self.y = projected.y;
        self.depth = depth_of(&self.iso_position);

        if self.snap > 0.0 {
            self.x = utils::snap_to(self.x, self.snap);
            self.y = utils::snap_to(self.y, self.snap);
        }

        self.position_changed = true;
        self.bounds_changed = true;
    }

    /// Derived 3D bounds, recomputed lazily.
    ///
    /// Returns the cache unless an iso coordinate, the size, the scale, or
    /// the origin changed since the last read.
    pub fn iso_bounds(&mut self) -> Cube {
        match self.iso_bounds {
            Some(bounds) if !self.bounds_changed => bounds,
            _ => {
                let bounds = self.reset_iso_bounds();
                self.bounds_changed = false;
                bounds
            }
        }
    }

    /// Recompute the derived bounds unconditionally and refresh the cache.
    ///
    /// The footprint comes from the sprite's visual width (half of it along
    /// each ground axis) and the remaining height becomes the vertical
    /// extent: the isometric sprite-sheet convention the art is drawn for.
    pub fn reset_iso_bounds(&mut self) -> Cube {
        let asx = self.scale_x.abs();
        let asy = self.scale_y.abs();
        let abs_width = self.width.abs();
        let abs_height = self.height.abs();

        let width_x = (abs_width * 0.5).round() * asx;
        let width_y = (abs_width * 0.5).round() * asx;
        let height = (abs_height - abs_width * 0.5).round() * asy;

        let bounds = Cube {
            x: self.iso_position.x + width_x * -self.origin_x + width_x * 0.5,
            y: self.iso_position.y + width_y * self.origin_x - width_y * 0.5,
            z: self.iso_position.z - abs_height * (1.0 - self.origin_y) + abs_width * 0.5,
            width_x,
            width_y,
            height,
        };

        self.iso_bounds = Some(bounds);
        bounds
    }

    fn invalidate_position(&mut self) {
        self.position_changed = true;
        self.bounds_changed = true;
        self.body_reset = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::projection::ProjectionKind;
    use approx::assert_relative_eq;

    fn projector() -> Projector {
        Projector::new(ProjectionKind::Classic, Vec2::zeros(), Vec2::zeros())
    }

    #[test]
    fn test_setters_mark_both_flags_and_body() {
        let mut transform = IsoTransform::new(Point3::new(0.0, 0.0, 0.0));
        transform.project(&projector());
        transform.iso_bounds();
        assert!(!transform.take_body_reset());

        transform.set_iso_x(4.0);
        assert!(transform.position_changed);
        assert!(transform.bounds_changed);
        assert!(transform.take_body_reset());

        transform.set_iso_y(2.0);
        assert!(transform.take_body_reset());
        transform.set_iso_z(1.0);
        assert!(transform.take_body_reset());
    }

    #[test]
    fn test_project_writes_placement_and_depth() {
        let mut transform = IsoTransform::new(Point3::new(10.0, 10.0, 0.0));
        transform.project(&projector());

        // x - y cancels at (10, 10); depth is the iso sum
        assert_relative_eq!(transform.x, 0.0);
        assert_relative_eq!(transform.depth, 20.0);

        transform.set_iso_z(8.0);
        transform.project(&projector());
        assert_relative_eq!(transform.depth, 30.0);
    }

    #[test]
    fn test_project_rearms_invalidation() {
        let mut transform = IsoTransform::new(Point3::new(1.0, 2.0, 3.0));
        transform.iso_bounds();
        assert!(!transform.bounds_changed);

        transform.project(&projector());
        assert!(transform.position_changed);
        assert!(transform.bounds_changed);
    }

    #[test]
    fn test_snap_produces_multiples() {
        let mut transform = IsoTransform::new(Point3::new(13.0, 1.0, 0.0)).with_snap(4.0);
        transform.project(&projector());
        assert_relative_eq!(transform.x % 4.0, 0.0);
        assert_relative_eq!(transform.y % 4.0, 0.0);

        // snap = 0 leaves the raw projection untouched
        let mut raw = IsoTransform::new(Point3::new(13.0, 1.0, 0.0));
        raw.project(&projector());
        let expected = projector().project(&Point3::new(13.0, 1.0, 0.0));
        assert_relative_eq!(raw.x, expected.x);
        assert_relative_eq!(raw.y, expected.y);
    }

    #[test]
    fn test_bounds_derivation_formulas() {
        let mut transform = IsoTransform::new(Point3::new(10.0, 10.0, 0.0)).with_size(32.0, 48.0);
        let bounds = transform.iso_bounds();

        // 32px wide sprite: 16 along each ground axis, 48 - 16 = 32 tall
        assert_relative_eq!(bounds.width_x, 16.0);
        assert_relative_eq!(bounds.width_y, 16.0);
        assert_relative_eq!(bounds.height, 32.0);

        // origin (0.5, 0.5): footprint centered on the iso position
        assert_relative_eq!(bounds.x, 10.0);
        assert_relative_eq!(bounds.y, 10.0);
        assert_relative_eq!(bounds.z, 0.0 - 48.0 * 0.5 + 16.0);
    }

    #[test]
    fn test_bounds_scale_applies_to_extents() {
        let mut transform = IsoTransform::new(Point3::new(0.0, 0.0, 0.0)).with_size(32.0, 48.0);
        transform.set_scale(2.0, 3.0);
        let bounds = transform.iso_bounds();

        assert_relative_eq!(bounds.width_x, 32.0);
        assert_relative_eq!(bounds.width_y, 32.0);
        assert_relative_eq!(bounds.height, 96.0);
    }

    #[test]
    fn test_bounds_cache_and_invalidation() {
        let mut transform = IsoTransform::new(Point3::new(10.0, 10.0, 0.0)).with_size(32.0, 48.0);
        let before = transform.iso_bounds();
        assert_eq!(transform.iso_bounds(), before);

        transform.set_iso_z(8.0);
        let after = transform.iso_bounds();
        assert!(after != before);
        assert_relative_eq!(after.z - before.z, 8.0);
    }

    #[test]
    fn test_iso_position_mut_invalidates() {
        let mut transform = IsoTransform::new(Point3::new(0.0, 0.0, 0.0));
        transform.project(&projector());
        transform.iso_bounds();

        transform.iso_position_mut().z = 4.0;
        assert!(transform.bounds_changed);
        assert!(transform.take_body_reset());

        transform.project(&projector());
        assert_relative_eq!(transform.depth, 5.0);
    }
}
