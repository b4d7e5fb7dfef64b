//! Scene layer: iso-positioned objects and their per-tick bookkeeping
//!
//! Single-threaded and frame-driven: the scene's `pre_update` runs every
//! entity's re-projection inside one tick, before the host renderer reads
//! any placement. Nothing here blocks or suspends.

pub mod bounds;
pub mod iso_transform;
pub mod render_queue;
pub mod scene_manager;
pub mod sprite;

pub use bounds::Cube;
pub use iso_transform::IsoTransform;
pub use render_queue::{DepthQueue, DrawItem, DrawSource};
pub use scene_manager::{IsoScene, SceneConfig, SceneError};
pub use sprite::IsoSprite;
