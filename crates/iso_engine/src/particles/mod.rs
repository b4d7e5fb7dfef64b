//! Particle system with iso-aware emission and depth tracking
//!
//! Managers are scene objects; emitters own recency-ordered pools of
//! particles; zones hand out pre-projected emission points. All
//! configuration arrives as declarative serde tables, with non-iso tables
//! logged and absorbed by plain fallbacks.

pub mod depth_policy;
pub mod emitter;
pub mod manager;
pub mod particle;
pub mod zone;

pub use depth_policy::{DepthAggregate, DepthConfig, DepthPolicy};
pub use emitter::{Emitter, EmitterConfig};
pub use manager::{EmitterManager, ManagerConfig};
pub use particle::Particle;
pub use zone::{EdgeSource, IsoZone, LineSource, RectSource, SourceConfig, ZoneConfig, ZonePoint};
