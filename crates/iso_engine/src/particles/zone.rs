//! Iso-aware particle emission zones
//!
//! A zone wraps a 2D edge geometry, projects every candidate point through
//! the scene's projector exactly once at construction, and then hands the
//! fixed points out to newly spawned particles in a deterministic cycle.
//! Points are never regenerated; a zone is rebuilt if its geometry or z
//! must change.

use crate::foundation::math::{utils, Point2, Point3};
use crate::particles::Particle;
use crate::projection::{depth_of, Projector};
use serde::{Deserialize, Serialize};

/// A supplier of candidate 2D emission points
///
/// `quantity` is the number of points to generate; when zero, the count is
/// derived from `step_rate`, the distance between neighboring points.
pub trait EdgeSource {
    /// Generate the candidate points
    fn points(&self, quantity: u32, step_rate: f32) -> Vec<Point2>;
}

/// Evenly spaced points along a line segment
///
/// The endpoint is excluded so a cyclic traversal does not stall on a
/// doubled point where the cycle closes.
#[derive(Debug, Clone, Copy)]
pub struct LineSource {
    /// Segment start
    pub from: Point2,
    /// Segment end
    pub to: Point2,
}

impl EdgeSource for LineSource {
    fn points(&self, quantity: u32, step_rate: f32) -> Vec<Point2> {
        let length = (self.to - self.from).norm();
        let count = resolve_count(quantity, step_rate, length);

        (0..count)
            .map(|i| {
                let t = i as f32 / count as f32;
                Point2::new(
                    utils::lerp(self.from.x, self.to.x, t),
                    utils::lerp(self.from.y, self.to.y, t),
                )
            })
            .collect()
    }
}

/// Points along a rectangle's perimeter, clockwise from the top-left corner
#[derive(Debug, Clone, Copy)]
pub struct RectSource {
    /// Top-left x
    pub x: f32,
    /// Top-left y
    pub y: f32,
    /// Rectangle width
    pub width: f32,
    /// Rectangle height
    pub height: f32,
}

impl RectSource {
    fn point_at(&self, distance: f32) -> Point2 {
        let w = self.width;
        let h = self.height;

        if distance < w {
            Point2::new(self.x + distance, self.y)
        } else if distance < w + h {
            Point2::new(self.x + w, self.y + (distance - w))
        } else if distance < 2.0 * w + h {
            Point2::new(self.x + w - (distance - w - h), self.y + h)
        } else {
            Point2::new(self.x, self.y + h - (distance - 2.0 * w - h))
        }
    }
}

impl EdgeSource for RectSource {
    fn points(&self, quantity: u32, step_rate: f32) -> Vec<Point2> {
        let perimeter = 2.0 * (self.width + self.height);
        let count = resolve_count(quantity, step_rate, perimeter);

        (0..count)
            .map(|i| self.point_at(perimeter * (i as f32 / count as f32)))
            .collect()
    }
}

/// Resolve the point count from an explicit quantity or a step rate over
/// the geometry's total length; always at least one point
fn resolve_count(quantity: u32, step_rate: f32, length: f32) -> u32 {
    let count = if quantity > 0 {
        quantity
    } else if step_rate > 0.0 {
        (length / step_rate).floor() as u32
    } else {
        0
    };
    count.max(1)
}

/// A projected emission point
///
/// `x`/`y` are screen coordinates; `depth` derives from the pre-projection
/// iso coordinates, never from the projected ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonePoint {
    /// Screen x
    pub x: f32,
    /// Screen y
    pub y: f32,
    /// Back-to-front sort key of the iso position
    pub depth: f32,
}

/// Declarative zone table of an emitter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Zone discriminant; only `"iso"` zones can be projected here
    #[serde(default = "ZoneConfig::default_kind")]
    pub kind: String,

    /// Iso z shared by every point in the zone
    #[serde(default)]
    pub z: f32,

    /// Geometry supplying the candidate points
    pub source: SourceConfig,

    /// Number of points to place; zero derives the count from `step_rate`
    #[serde(default = "ZoneConfig::default_quantity")]
    pub quantity: u32,

    /// Distance between points when `quantity` is zero
    #[serde(default)]
    pub step_rate: f32,

    /// Ping-pong traversal instead of wrapping at the end
    #[serde(default)]
    pub yoyo: bool,

    /// Drop the last point when it coincides with the first
    #[serde(default = "ZoneConfig::default_seamless")]
    pub seamless: bool,
}

impl ZoneConfig {
    fn default_kind() -> String {
        "random".to_string()
    }

    fn default_quantity() -> u32 {
        1
    }

    fn default_seamless() -> bool {
        true
    }

    /// Whether this table describes an iso zone
    pub fn is_iso(&self) -> bool {
        self.kind == "iso"
    }
}

/// Geometry behind a zone, in declarative form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// Segment from `from` to `to`
    Line {
        /// Segment start
        from: [f32; 2],
        /// Segment end
        to: [f32; 2],
    },
    /// Rectangle perimeter
    Rect {
        /// Top-left x
        x: f32,
        /// Top-left y
        y: f32,
        /// Rectangle width
        width: f32,
        /// Rectangle height
        height: f32,
    },
}

impl SourceConfig {
    /// Materialize the geometry
    pub fn build(&self) -> Box<dyn EdgeSource> {
        match *self {
            Self::Line { from, to } => Box::new(LineSource {
                from: Point2::new(from[0], from[1]),
                to: Point2::new(to[0], to[1]),
            }),
            Self::Rect {
                x,
                y,
                width,
                height,
            } => Box::new(RectSource {
                x,
                y,
                width,
                height,
            }),
        }
    }
}

/// An emission zone whose candidate points live in iso space
///
/// Traversal is a lazy, restartable, infinite walk over the fixed backing
/// array: forward with a wrap to the start, or ping-pong when `yoyo` is
/// enabled.
#[derive(Debug, Clone)]
pub struct IsoZone {
    points: Vec<ZonePoint>,
    cursor: isize,
    forward: bool,
    yoyo: bool,
}

impl IsoZone {
    /// Build a zone by generating points from `source` and projecting each
    /// one at the shared `z`.
    ///
    /// When `seamless` is set and the first and last generated points
    /// coincide, the last is dropped so the cycle has no doubled seam.
    pub fn new(
        z: f32,
        projector: &Projector,
        source: &dyn EdgeSource,
        quantity: u32,
        step_rate: f32,
        yoyo: bool,
        seamless: bool,
    ) -> Self {
        let mut raw = source.points(quantity, step_rate);

        if seamless && raw.len() > 1 && raw.first() == raw.last() {
            raw.pop();
        }

        let points = raw
            .iter()
            .map(|point| {
                let iso = Point3::new(point.x, point.y, z);
                let projected = projector.project(&iso);
                ZonePoint {
                    x: projected.x,
                    y: projected.y,
                    depth: depth_of(&iso),
                }
            })
            .collect();

        Self {
            points,
            cursor: -1,
            forward: true,
            yoyo,
        }
    }

    /// Build a zone from its declarative table
    pub fn from_config(config: &ZoneConfig, projector: &Projector) -> Self {
        let source = config.source.build();
        Self::new(
            config.z,
            projector,
            source.as_ref(),
            config.quantity,
            config.step_rate,
            config.yoyo,
            config.seamless,
        )
    }

    /// Number of points in the zone
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the zone has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The projected points backing the traversal
    pub fn points(&self) -> &[ZonePoint] {
        &self.points
    }

    /// Advance the cursor and hand out the next emission point.
    ///
    /// With `yoyo` the cursor bounces between the ends without repeating
    /// them (`0,1,…,N-1,N-2,…,1,0,1,…`); without it the cursor wraps back
    /// to the start.
    pub fn next_point(&mut self) -> Option<ZonePoint> {
        if self.points.is_empty() {
            return None;
        }
        let len = self.points.len() as isize;

        if self.forward {
            self.cursor += 1;
            if self.cursor >= len {
                if self.yoyo && len > 1 {
                    self.forward = false;
                    self.cursor = len - 2;
                } else {
                    self.cursor = 0;
                }
            }
        } else {
            // walking backwards only happens mid-yoyo
            self.cursor -= 1;
            if self.cursor < 0 {
                self.forward = true;
                self.cursor = 1.min(len - 1);
            }
        }

        self.points.get(self.cursor as usize).copied()
    }

    /// Write the next emission point onto a freshly spawned particle
    pub fn place(&mut self, particle: &mut Particle) {
        if let Some(point) = self.next_point() {
            particle.x = point.x;
            particle.y = point.y;
            particle.depth = point.depth;
        }
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

    fn line() -> LineSource {
        LineSource {
            from: Point2::new(0.0, 0.0),
            to: Point2::new(10.0, 0.0),
        }
    }

    #[test]
    fn test_line_source_quantity() {
        let points = line().points(5, 0.0);
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[4].x, 8.0);
    }

    #[test]
    fn test_line_source_step_rate() {
        let points = line().points(0, 2.0);
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[1].x, 2.0);
    }

    #[test]
    fn test_rect_source_walks_perimeter() {
        let rect = RectSource {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 2.0,
        };
        let points = rect.points(4, 0.0);
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[0].y, 0.0);
        // quarters of the 12-unit perimeter: top edge, bottom-right
        // corner, bottom edge
        assert_relative_eq!(points[1].x, 3.0);
        assert_relative_eq!(points[1].y, 0.0);
        assert_relative_eq!(points[2].x, 4.0);
        assert_relative_eq!(points[2].y, 2.0);
        assert_relative_eq!(points[3].x, 1.0);
        assert_relative_eq!(points[3].y, 2.0);
    }

    #[test]
    fn test_seamless_drops_duplicate_endpoint() {
        struct ClosedLoop;
        impl EdgeSource for ClosedLoop {
            fn points(&self, _quantity: u32, _step_rate: f32) -> Vec<Point2> {
                vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(1.0, 0.0),
                    Point2::new(0.0, 0.0),
                ]
            }
        }

        let zone = IsoZone::new(0.0, &projector(), &ClosedLoop, 3, 0.0, false, true);
        assert_eq!(zone.len(), 2);

        let kept = IsoZone::new(0.0, &projector(), &ClosedLoop, 3, 0.0, false, false);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_depth_uses_pre_projection_coordinates() {
        let zone = IsoZone::new(4.0, &projector(), &line(), 2, 0.0, false, true);
        let points = zone.points();

        // first point is iso (0, 0, 4): depth 5, screen y offset by -z
        assert_relative_eq!(points[0].depth, 5.0);
        assert_relative_eq!(points[0].y, -4.0);

        // second point is iso (5, 0, 4): depth reflects iso x, not screen x
        assert_relative_eq!(points[1].depth, 10.0);
    }

    fn cursor_sequence(zone: &mut IsoZone, steps: usize) -> Vec<f32> {
        (0..steps)
            .map(|_| zone.next_point().expect("zone has points").depth)
            .collect()
    }

    #[test]
    fn test_traversal_wraps_without_yoyo() {
        let mut zone = IsoZone::new(0.0, &projector(), &line(), 3, 0.0, false, true);
        let depths = cursor_sequence(&mut zone, 7);
        let base: Vec<f32> = zone.points().iter().map(|p| p.depth).collect();

        let expected = vec![base[0], base[1], base[2], base[0], base[1], base[2], base[0]];
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_traversal_yoyo_has_2n_minus_2_period() {
        let mut zone = IsoZone::new(0.0, &projector(), &line(), 3, 0.0, true, true);
        let depths = cursor_sequence(&mut zone, 9);
        let base: Vec<f32> = zone.points().iter().map(|p| p.depth).collect();

        // 0,1,2,1,0,1,2,1,0 with no doubled endpoints
        let expected = vec![
            base[0], base[1], base[2], base[1], base[0], base[1], base[2], base[1], base[0],
        ];
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_single_point_zone_never_stalls() {
        let mut zone = IsoZone::new(0.0, &projector(), &line(), 1, 0.0, true, true);
        for _ in 0..5 {
            assert!(zone.next_point().is_some());
        }
    }

    #[test]
    fn test_place_writes_particle_fields() {
        let mut zone = IsoZone::new(2.0, &projector(), &line(), 3, 0.0, false, true);
        let mut particle = Particle::new(1000.0, Vec2::zeros());

        zone.place(&mut particle);
        let first = zone.points()[0];
        assert_relative_eq!(particle.x, first.x);
        assert_relative_eq!(particle.y, first.y);
        assert_relative_eq!(particle.depth, first.depth);
    }

    #[test]
    fn test_zone_config_parses_from_ron() {
        use crate::config::Config;

        #[derive(serde::Serialize, serde::Deserialize, Default)]
        struct Wrapper {
            zone: Option<ZoneConfig>,
        }
        impl Config for Wrapper {}

        let source = r#"(
            zone: Some((
                kind: "iso",
                z: 3.0,
                source: line(from: [0.0, 0.0], to: [10.0, 0.0]),
                quantity: 4,
                yoyo: true,
            )),
        )"#;
        let wrapper = Wrapper::from_ron_str(source).expect("parse");
        let zone = wrapper.zone.expect("zone table");
        assert!(zone.is_iso());
        assert!(zone.yoyo);
        assert!(zone.seamless);
        assert_eq!(zone.quantity, 4);
    }
}
