//! Renderable iso sprite

use crate::projection::Projector;
use crate::scene::IsoTransform;

/// A renderable entity placed in iso space
///
/// Composes an [`IsoTransform`] with the render-facing bits the host needs:
/// a texture key and a visibility flag. The host reads `transform.x`,
/// `transform.y` and `transform.depth` for placement and draw order.
#[derive(Debug, Clone)]
pub struct IsoSprite {
    /// Texture key the host renderer draws this sprite with
    pub texture: String,

    /// Whether this sprite is visible
    pub visible: bool,

    /// Spatial state; placement fields are valid after `pre_update`
    pub transform: IsoTransform,
}

impl IsoSprite {
    /// Create a sprite at the given transform
    pub fn new(texture: impl Into<String>, transform: IsoTransform) -> Self {
        Self {
            texture: texture.into(),
            visible: true,
            transform,
        }
    }

    /// Per-tick update hook: re-project the placement.
    ///
    /// The scene calls this for every sprite before the host reads any
    /// placement field in the same tick.
    pub fn pre_update(&mut self, projector: &Projector) {
        self.transform.project(projector);
    }

    /// Check if this sprite should be rendered
    pub fn should_render(&self) -> bool {
        self.visible
    }
}
