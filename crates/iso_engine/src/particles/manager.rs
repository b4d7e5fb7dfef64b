//! Particle emitter manager
//!
//! An iso-positioned container of emitters. The manager itself is a scene
//! object with a placement the host draws particles relative to; its depth
//! follows its [`DepthPolicy`].

use crate::foundation::math::Point3;
use crate::particles::{DepthConfig, DepthPolicy, Emitter, EmitterConfig, ZonePoint};
use crate::projection::{depth_of, Projector};
use crate::scene::IsoTransform;
use serde::{Deserialize, Serialize};

/// Declarative manager settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManagerConfig {
    /// Texture key the host renderer draws this manager's particles with
    #[serde(default)]
    pub texture: String,

    /// Iso position of the manager itself
    #[serde(default)]
    pub iso_position: [f32; 3],

    /// Depth policy table
    #[serde(default)]
    pub depth: DepthConfig,

    /// Emitter tables
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
}

impl crate::config::Config for ManagerConfig {}

/// An iso-positioned container of particle emitters
///
/// `origin_depth` is the manager's iso-derived depth, recorded once at
/// construction; dynamic policies clamp around it and fall back to it when
/// no particle is alive.
#[derive(Debug, Clone)]
pub struct EmitterManager {
    /// Texture key used to draw this manager's particles
    pub texture: String,

    /// Spatial state; `transform.depth` is rewritten by the depth policy
    /// every tick
    pub transform: IsoTransform,

    policy: DepthPolicy,
    origin_depth: f32,
    emitters: Vec<Emitter>,
}

impl EmitterManager {
    /// Build a manager and its emitters from config.
    ///
    /// The manager is projected immediately and its emission zones are
    /// projected as they are built, so every placement is valid without
    /// waiting for the first tick.
    pub fn new(config: ManagerConfig, projector: &Projector) -> Self {
        let position = Point3::new(
            config.iso_position[0],
            config.iso_position[1],
            config.iso_position[2],
        );
        let mut transform = IsoTransform::new(position);
        transform.project(projector);

        let origin_depth = depth_of(&position);
        let policy = DepthPolicy::from_config(&config.depth);
        let emitters = config
            .emitters
            .into_iter()
            .map(|emitter_config| Emitter::new(emitter_config, projector))
            .collect();

        log::debug!(
            "emitter manager at iso {position:?}: origin depth {origin_depth}, policy {policy:?}"
        );

        Self {
            texture: config.texture,
            transform,
            policy,
            origin_depth,
            emitters,
        }
    }

    /// The depth policy in effect
    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    /// The origin depth recorded at construction
    pub fn origin_depth(&self) -> f32 {
        self.origin_depth
    }

    /// The manager's emitters
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// Mutable access to the manager's emitters
    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    /// Alive particles across every emitter, in pool recency order
    pub fn alive_particles(&self) -> impl Iterator<Item = &crate::particles::Particle> {
        self.emitters.iter().flat_map(Emitter::particles)
    }

    /// Total number of alive particles
    pub fn alive_count(&self) -> usize {
        self.emitters.iter().map(Emitter::alive_count).sum()
    }

    /// Per-tick update: re-project the manager, tick every emitter, then
    /// apply the depth policy over the freshly updated pools.
    ///
    /// Runs the aggregation after the child updates so it observes current
    /// alive-particle depths.
    pub fn pre_update(&mut self, projector: &Projector, delta_ms: f32) {
        self.transform.project(projector);

        let fallback = ZonePoint {
            x: self.transform.x,
            y: self.transform.y,
            depth: self.origin_depth,
        };
        for emitter in &mut self.emitters {
            emitter.update(delta_ms, fallback);
        }

        let depth = self.policy.evaluate(
            self.origin_depth,
            self.emitters.iter().flat_map(Emitter::particles),
        );
        self.transform.depth = depth;
    }
}
