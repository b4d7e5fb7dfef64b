//! Math utilities and types
//!
//! Provides the fundamental math types for axonometric projection work.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Projection angle of the classic 2:1 pixel-art dimetric projection, atan(1/2)
    pub const CLASSIC_ANGLE: f32 = 0.463_647_61;

    /// Projection angle of a true isometric projection (30 degrees)
    pub const TRUE_ISOMETRIC_ANGLE: f32 = PI / 6.0;

    /// Projection angle of a military axonometric projection (45 degrees)
    pub const MILITARY_ANGLE: f32 = PI / 4.0;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Snap a value to the nearest multiple of `gap`.
    ///
    /// A gap of zero (or less) leaves the value unmodified; handy for
    /// keeping pixel art on whole pixels without making snapping mandatory.
    pub fn snap_to(value: f32, gap: f32) -> f32 {
        if gap <= 0.0 {
            return value;
        }
        (value / gap).round() * gap
    }
}
