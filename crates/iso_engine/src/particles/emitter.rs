//! Particle emitter
//!
//! Owns a pool of alive particles in recency order and spawns new ones at a
//! configured frequency, placing them through an iso emission zone when one
//! is configured.

use crate::foundation::math::Vec2;
use crate::particles::{IsoZone, Particle, ZoneConfig, ZonePoint};
use crate::projection::Projector;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Declarative emitter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Milliseconds between emissions; zero emits every tick
    #[serde(default = "EmitterConfig::default_frequency")]
    pub frequency_ms: f32,

    /// Particles per emission
    #[serde(default = "EmitterConfig::default_quantity")]
    pub quantity: u32,

    /// Particle lifespan in milliseconds
    #[serde(default = "EmitterConfig::default_lifespan")]
    pub lifespan_ms: f32,

    /// Velocity applied to spawned particles, pixels per second
    #[serde(default)]
    pub velocity: [f32; 2],

    /// Upper bound on the alive pool; zero means unbounded
    #[serde(default)]
    pub max_particles: u32,

    /// Optional emission zone table
    #[serde(default)]
    pub emit_zone: Option<ZoneConfig>,
}

impl EmitterConfig {
    fn default_frequency() -> f32 {
        100.0
    }

    fn default_quantity() -> u32 {
        1
    }

    fn default_lifespan() -> f32 {
        1000.0
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            frequency_ms: Self::default_frequency(),
            quantity: Self::default_quantity(),
            lifespan_ms: Self::default_lifespan(),
            velocity: [0.0, 0.0],
            max_particles: 0,
            emit_zone: None,
        }
    }
}

/// A particle emitter owned by an emitter manager
///
/// The alive pool keeps recency order: front is the oldest particle, back
/// the newest. Nothing here reorders it; draw ordering is produced
/// separately by [`Emitter::draw_order`].
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Whether the emitter spawns new particles
    pub on: bool,

    config: EmitterConfig,
    zone: Option<IsoZone>,
    particles: VecDeque<Particle>,
    spawn_accumulator_ms: f32,
}

impl Emitter {
    /// Build an emitter from its config, projecting its emission zone.
    ///
    /// A config with a zone table of any kind other than `"iso"` cannot be
    /// projected here; the mismatch is logged and the emitter falls back to
    /// plain emission at the manager's placement.
    pub fn new(config: EmitterConfig, projector: &Projector) -> Self {
        let zone = match &config.emit_zone {
            Some(zone_config) if zone_config.is_iso() => {
                Some(IsoZone::from_config(zone_config, projector))
            }
            Some(zone_config) => {
                log::error!(
                    "no emit zone of kind \"iso\" found (got {:?}), using plain emission",
                    zone_config.kind
                );
                None
            }
            None => None,
        };

        Self {
            on: true,
            config,
            zone,
            particles: VecDeque::with_capacity(32),
            spawn_accumulator_ms: 0.0,
        }
    }

    /// The emitter's configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// The projected emission zone, if the config carried one
    pub fn zone(&self) -> Option<&IsoZone> {
        self.zone.as_ref()
    }

    /// Advance the emitter by one tick: age particles, retire the dead,
    /// then spawn at the configured frequency.
    ///
    /// `fallback` is the manager's placement, used for spawns when no iso
    /// zone is configured.
    pub fn update(&mut self, delta_ms: f32, fallback: ZonePoint) {
        for particle in &mut self.particles {
            particle.update(delta_ms);
        }
        // retire without reordering the survivors
        self.particles.retain(Particle::is_alive);

        if !self.on {
            return;
        }

        self.spawn_accumulator_ms += delta_ms;
        let interval = self.config.frequency_ms;
        if interval <= 0.0 {
            self.emit(fallback);
            self.spawn_accumulator_ms = 0.0;
        } else {
            while self.spawn_accumulator_ms >= interval {
                self.spawn_accumulator_ms -= interval;
                self.emit(fallback);
            }
        }
    }

    fn emit(&mut self, fallback: ZonePoint) {
        for _ in 0..self.config.quantity {
            if self.config.max_particles > 0
                && self.particles.len() as u32 >= self.config.max_particles
            {
                break;
            }

            let mut particle = Particle::new(
                self.config.lifespan_ms,
                Vec2::new(self.config.velocity[0], self.config.velocity[1]),
            );
            match &mut self.zone {
                Some(zone) => zone.place(&mut particle),
                None => {
                    particle.x = fallback.x;
                    particle.y = fallback.y;
                    particle.depth = fallback.depth;
                }
            }
            self.particles.push_back(particle);
        }
    }

    /// Alive particles in recency order, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Number of alive particles
    pub fn alive_count(&self) -> usize {
        self.particles.len()
    }

    /// Stable depth-ascending ordering for drawing.
    ///
    /// Equal depths keep pool order; the pool itself is never reordered.
    pub fn draw_order(&self) -> Vec<&Particle> {
        let mut order: Vec<&Particle> = self.particles.iter().collect();
        order.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        order
    }
}
