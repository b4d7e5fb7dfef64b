//! Depth sort keys for back-to-front draw ordering

use crate::foundation::math::Point3;

/// Weight of the z coordinate in a depth key.
///
/// Greater than 1 so vertical movement dominates ties between objects with
/// close x+y sums. The value matches the sprite-sheet convention the art
/// assets are produced for and must not be re-derived.
pub const Z_DEPTH_WEIGHT: f32 = 1.25;

/// Compute the scalar sort key for a 3D iso position.
///
/// `(x + y) + z * 1.25`: strictly increasing in z for fixed x and y, and in
/// x + y for fixed z, so an ascending sort yields a scene-consistent
/// back-to-front order. Not a distance metric.
pub fn depth_of(position: &Point3) -> f32 {
    (position.x + position.y) + position.z * Z_DEPTH_WEIGHT
}

/// Clamp a depth to `bound` either side of `origin`.
///
/// A bound of zero (or less) leaves the depth unmodified.
pub fn clamp_about(depth: f32, origin: f32, bound: f32) -> f32 {
    if bound <= 0.0 {
        return depth;
    }
    if depth >= origin {
        (origin + bound).min(depth)
    } else {
        (origin - bound).max(depth)
    }
}
