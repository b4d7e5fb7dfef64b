//! # Iso Engine
//!
//! Axonometric ("isometric") placement for 2D scene-graph hosts.
//!
//! Entities carry a logical 3D position; the engine derives the 2D screen
//! coordinates used for rendering plus a scalar depth that orders
//! overlapping objects back-to-front. Particle emitter managers extend this
//! with depth policies driven by their live particle population and
//! emission zones that are themselves projected into iso space.
//!
//! ## Features
//!
//! - **Projector**: deterministic axonometric transform, one per scene
//! - **Iso transform**: lazy re-projection with an invalidation protocol
//!   and derived 3D bounds for the physics collaborator
//! - **Depth policies**: static or population-driven manager depth with
//!   optional clamping
//! - **Iso zones**: deterministic (optionally ping-pong) traversal over
//!   pre-projected emission points
//!
//! ## Quick Start
//!
//! ```rust
//! use iso_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = IsoScene::new(SceneConfig::default())?;
//!
//!     let tile = scene.add_sprite(IsoSprite::new(
//!         "tile",
//!         IsoTransform::new(Point3::new(10.0, 10.0, 0.0)).with_size(32.0, 48.0),
//!     ));
//!
//!     // once per frame, before the host reads placements
//!     scene.pre_update(16.0);
//!
//!     let queue = scene.depth_queue();
//!     assert_eq!(queue.len(), 1);
//!     assert_eq!(scene.sprite(tile).unwrap().transform.depth, 20.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod particles;
pub mod projection;
pub mod scene;

pub use scene::{IsoScene, SceneConfig, SceneError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::TypedHandle,
            math::{Point2, Point3, Vec2},
            time::Timer,
        },
        particles::{
            DepthConfig, DepthPolicy, Emitter, EmitterConfig, EmitterManager, IsoZone,
            LineSource, ManagerConfig, Particle, RectSource, SourceConfig, ZoneConfig,
        },
        projection::{depth_of, ProjectionConfig, ProjectionKind, Projector},
        scene::{Cube, DepthQueue, IsoScene, IsoSprite, IsoTransform, SceneConfig, SceneError},
    };
}
