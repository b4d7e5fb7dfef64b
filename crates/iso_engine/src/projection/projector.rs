//! Axonometric projection from 3D scene coordinates to 2D screen coordinates

use crate::foundation::math::{constants, Point2, Point3, Vec2};
use serde::{Deserialize, Serialize};

/// Axonometric variant a scene projects through
///
/// The kind fixes the projection angle; it is chosen once when the scene's
/// [`Projector`] is built and cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// The 2:1 pixel-art dimetric projection, angle = atan(1/2)
    Classic,
    /// True isometric projection, 30 degrees
    TrueIsometric,
    /// Military axonometric projection, 45 degrees
    Military,
    /// Custom axonometric angle, in degrees
    Custom(f32),
}

impl Default for ProjectionKind {
    fn default() -> Self {
        Self::Classic
    }
}

impl ProjectionKind {
    /// Projection angle in radians
    pub fn angle(self) -> f32 {
        match self {
            Self::Classic => constants::CLASSIC_ANGLE,
            Self::TrueIsometric => constants::TRUE_ISOMETRIC_ANGLE,
            Self::Military => constants::MILITARY_ANGLE,
            Self::Custom(degrees) => degrees * constants::DEG_TO_RAD,
        }
    }
}

/// Projection table of a scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Axonometric variant
    #[serde(default)]
    pub kind: ProjectionKind,

    /// Relative anchor of the projected origin within the viewport;
    /// (0.5, 0.0) centers the iso origin horizontally at the top edge
    #[serde(default = "ProjectionConfig::default_anchor")]
    pub anchor: Vec2,
}

impl ProjectionConfig {
    fn default_anchor() -> Vec2 {
        Vec2::new(0.5, 0.0)
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            kind: ProjectionKind::default(),
            anchor: Self::default_anchor(),
        }
    }
}

/// Pure transform from 3D iso space to 2D screen space
///
/// One Projector is owned by each scene and shared read-only by every
/// iso-positioned entity in it. Projection is deterministic: equal inputs
/// always yield equal outputs, and no call mutates the Projector.
///
/// The Projector deliberately does not produce depth sort keys; those come
/// from [`crate::projection::depth_of`], which zones and entities apply to
/// their own iso coordinates.
#[derive(Debug, Clone)]
pub struct Projector {
    /// [cos(angle), sin(angle)] of the projection angle
    transform: [f32; 2],

    /// Pixel offset of the iso origin, viewport * anchor
    origin: Vec2,
}

impl Projector {
    /// Create a projector for the given variant, viewport size (pixels),
    /// and relative origin anchor
    pub fn new(kind: ProjectionKind, viewport: Vec2, anchor: Vec2) -> Self {
        let angle = kind.angle();
        Self {
            transform: [angle.cos(), angle.sin()],
            origin: viewport.component_mul(&anchor),
        }
    }

    /// Create a projector from a scene's projection table
    pub fn from_config(config: &ProjectionConfig, viewport: Vec2) -> Self {
        Self::new(config.kind, viewport, config.anchor)
    }

    /// Project a 3D iso position to screen coordinates
    ///
    /// Total over all real inputs; there are no invalid coordinates.
    pub fn project(&self, position: &Point3) -> Point2 {
        Point2::new(
            (position.x - position.y) * self.transform[0] + self.origin.x,
            (position.x + position.y) * self.transform[1] - position.z + self.origin.y,
        )
    }

    /// Invert the projection at a given z plane
    ///
    /// `project` collapses one dimension, so the inverse needs the z the
    /// screen point is assumed to lie on.
    pub fn unproject(&self, point: &Point2, z: f32) -> Point3 {
        let sx = point.x - self.origin.x;
        let sy = point.y - self.origin.y + z;

        Point3::new(
            sx / (2.0 * self.transform[0]) + sy / (2.0 * self.transform[1]),
            -(sx / (2.0 * self.transform[0])) + sy / (2.0 * self.transform[1]),
            z,
        )
    }
}
