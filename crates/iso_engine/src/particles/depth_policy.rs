//! Depth policies for particle-emitter managers
//!
//! A manager's depth either stays at the origin depth recorded when the
//! manager was built, or tracks an aggregate of its alive particles every
//! tick, optionally clamped to a window around the origin depth.

use crate::particles::Particle;
use crate::projection::clamp_about;
use serde::{Deserialize, Serialize};

/// Which aggregate a dynamic policy computes over the alive pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthAggregate {
    /// Arithmetic mean over every alive particle
    Mean,
    /// Depth of the oldest particle still alive
    First,
    /// Depth of the newest particle still alive
    Last,
}

/// Depth behavior of a particle-emitter manager
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthPolicy {
    /// Depth fixed at the origin depth recorded at construction
    Static,
    /// Depth follows the alive particle population each tick
    Dynamic {
        /// Aggregate over the alive pool
        aggregate: DepthAggregate,
        /// Clamp distance either side of the origin depth; zero disables
        /// clamping
        bound: f32,
    },
}

/// Declarative form of a depth policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthConfig {
    /// `"static"`, `"mean"`, `"first"` or `"last"`
    #[serde(default = "DepthConfig::default_kind")]
    pub kind: String,

    /// Clamp distance around the origin depth; zero disables clamping
    #[serde(default)]
    pub bound: f32,
}

impl DepthConfig {
    fn default_kind() -> String {
        "static".to_string()
    }
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            kind: Self::default_kind(),
            bound: 0.0,
        }
    }
}

impl DepthPolicy {
    /// Parse a declarative depth table.
    ///
    /// An unrecognized kind is a configuration error: it is logged and the
    /// policy falls back to the static origin depth.
    pub fn from_config(config: &DepthConfig) -> Self {
        let bound = config.bound.max(0.0);
        match config.kind.as_str() {
            "static" => Self::Static,
            "mean" => Self::Dynamic {
                aggregate: DepthAggregate::Mean,
                bound,
            },
            "first" => Self::Dynamic {
                aggregate: DepthAggregate::First,
                bound,
            },
            "last" => Self::Dynamic {
                aggregate: DepthAggregate::Last,
                bound,
            },
            other => {
                log::error!(
                    "unrecognized depth policy kind {other:?}, falling back to the static origin depth"
                );
                Self::Static
            }
        }
    }

    /// Whether this policy recomputes depth every tick
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }

    /// Evaluate the manager depth for this tick.
    ///
    /// `alive` must iterate the pool in recency order, oldest first. With
    /// no alive particle the result is exactly `origin_depth`; a static
    /// policy returns it unconditionally.
    pub fn evaluate<'a, I>(&self, origin_depth: f32, alive: I) -> f32
    where
        I: Iterator<Item = &'a Particle>,
    {
        let Self::Dynamic { aggregate, bound } = *self else {
            return origin_depth;
        };

        let mut alive = alive;
        let raw = match aggregate {
            DepthAggregate::Mean => {
                let mut sum = 0.0;
                let mut count = 0_usize;
                for particle in alive {
                    sum += particle.depth;
                    count += 1;
                }
                if count == 0 {
                    return origin_depth;
                }
                sum / count as f32
            }
            DepthAggregate::First => match alive.next() {
                Some(particle) => particle.depth,
                None => return origin_depth,
            },
            DepthAggregate::Last => match alive.last() {
                Some(particle) => particle.depth,
                None => return origin_depth,
            },
        };

        clamp_about(raw, origin_depth, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn particles(depths: &[f32]) -> Vec<Particle> {
        depths
            .iter()
            .map(|&depth| {
                let mut particle = Particle::new(1000.0, Vec2::zeros());
                particle.depth = depth;
                particle
            })
            .collect()
    }

    fn config(kind: &str, bound: f32) -> DepthConfig {
        DepthConfig {
            kind: kind.to_string(),
            bound,
        }
    }

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(DepthPolicy::from_config(&config("static", 0.0)), DepthPolicy::Static);
        assert!(DepthPolicy::from_config(&config("mean", 2.0)).is_dynamic());
        assert!(DepthPolicy::from_config(&config("first", 0.0)).is_dynamic());
        assert!(DepthPolicy::from_config(&config("last", 0.0)).is_dynamic());
    }

    #[test]
    fn test_parse_unrecognized_kind_falls_back_to_static() {
        let policy = DepthPolicy::from_config(&config("median", 3.0));
        assert_eq!(policy, DepthPolicy::Static);
    }

    #[test]
    fn test_empty_pool_reverts_to_origin_exactly() {
        let policy = DepthPolicy::from_config(&config("mean", 5.0));
        let pool: Vec<Particle> = Vec::new();
        let depth = policy.evaluate(50.0, pool.iter());
        assert_eq!(depth, 50.0);
    }

    #[test]
    fn test_mean_with_clamp_scenario() {
        // origin 50, bound 5, alive depths {60, 62, 64}: raw mean 62,
        // clamped down to 55
        let policy = DepthPolicy::from_config(&config("mean", 5.0));
        let pool = particles(&[60.0, 62.0, 64.0]);
        assert_relative_eq!(policy.evaluate(50.0, pool.iter()), 55.0);
    }

    #[test]
    fn test_clamp_lower_side() {
        let policy = DepthPolicy::from_config(&config("mean", 5.0));
        let pool = particles(&[30.0, 32.0]);
        assert_relative_eq!(policy.evaluate(50.0, pool.iter()), 45.0);
    }

    #[test]
    fn test_first_and_last_track_pool_order() {
        let pool = particles(&[12.0, 48.0, 36.0]);

        let first = DepthPolicy::from_config(&config("first", 0.0));
        assert_relative_eq!(first.evaluate(0.0, pool.iter()), 12.0);

        let last = DepthPolicy::from_config(&config("last", 0.0));
        assert_relative_eq!(last.evaluate(0.0, pool.iter()), 36.0);
    }

    #[test]
    fn test_unclamped_mean() {
        let policy = DepthPolicy::from_config(&config("mean", 0.0));
        let pool = particles(&[10.0, 20.0]);
        assert_relative_eq!(policy.evaluate(50.0, pool.iter()), 15.0);
    }

    #[test]
    fn test_result_always_inside_bound_window() {
        let policy = DepthPolicy::from_config(&config("last", 4.0));
        for depth in [-100.0, 0.0, 49.0, 51.0, 200.0] {
            let pool = particles(&[depth]);
            let result = policy.evaluate(50.0, pool.iter());
            assert!(result >= 46.0 && result <= 54.0);
        }
    }
}
