//! Scene manager - owns the projector and every iso-positioned object
//!
//! The scene is the single place a [`Projector`] lives; entities never look
//! it up through globals. `pre_update` drives the per-tick re-projection of
//! every object, and must complete before the host reads any placement in
//! that tick.

use crate::config::{Config, ConfigError};
use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Vec2;
use crate::particles::{EmitterManager, ManagerConfig};
use crate::projection::{ProjectionConfig, Projector};
use crate::scene::{DepthQueue, DrawItem, DrawSource, IsoSprite};
use serde::{Deserialize, Serialize};

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Projection table; a scene cannot be built without one
    #[serde(default)]
    pub projection: Option<ProjectionConfig>,

    /// Viewport size in pixels, used for the projected origin offset
    #[serde(default = "SceneConfig::default_viewport")]
    pub viewport: Vec2,

    /// Default snap increment applied to sprites that do not set their own
    #[serde(default)]
    pub snap: f32,
}

impl SceneConfig {
    fn default_viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            projection: Some(ProjectionConfig::default()),
            viewport: Self::default_viewport(),
            snap: 0.0,
        }
    }
}

impl Config for SceneConfig {}

/// Errors raised while building a scene
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// The scene configuration carries no projection table; building
    /// entities against it would only produce garbage placements
    #[error("scene configuration has no projection table")]
    MissingProjection,

    /// Configuration file problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// An iso scene: one projector plus the sprites and particle managers
/// positioned through it
pub struct IsoScene {
    config: SceneConfig,
    projector: Projector,
    sprites: HandleMap<IsoSprite>,
    managers: HandleMap<EmitterManager>,
}

impl IsoScene {
    /// Build a scene from its configuration.
    ///
    /// Fails fast when the configuration has no projection table, so no
    /// entity can ever be projected against a missing projector.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let projection = config
            .projection
            .as_ref()
            .ok_or(SceneError::MissingProjection)?;
        let projector = Projector::from_config(projection, config.viewport);

        log::info!(
            "iso scene ready: {:?} projection, viewport {}x{}",
            projection.kind,
            config.viewport.x,
            config.viewport.y
        );

        Ok(Self {
            config,
            projector,
            sprites: HandleMap::default(),
            managers: HandleMap::default(),
        })
    }

    /// Build a scene from a configuration file (TOML or RON)
    pub fn from_file(path: &str) -> Result<Self, SceneError> {
        Ok(Self::new(SceneConfig::load_from_file(path)?)?)
    }

    /// The scene's projector
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Add a sprite; it is projected immediately so its placement is valid
    /// without waiting for the first tick.
    ///
    /// Sprites without their own snap inherit the scene default.
    pub fn add_sprite(&mut self, mut sprite: IsoSprite) -> TypedHandle<IsoSprite> {
        if sprite.transform.snap <= 0.0 {
            sprite.transform.snap = self.config.snap;
        }
        sprite.transform.project(&self.projector);
        TypedHandle::new(self.sprites.insert(sprite))
    }

    /// Add a particle emitter manager built from its configuration.
    ///
    /// The manager and its emission zones are projected at construction.
    pub fn add_particles(&mut self, config: ManagerConfig) -> TypedHandle<EmitterManager> {
        let manager = EmitterManager::new(config, &self.projector);
        TypedHandle::new(self.managers.insert(manager))
    }

    /// Look up a sprite
    pub fn sprite(&self, handle: TypedHandle<IsoSprite>) -> Option<&IsoSprite> {
        self.sprites.get(handle.key())
    }

    /// Look up a sprite mutably
    pub fn sprite_mut(&mut self, handle: TypedHandle<IsoSprite>) -> Option<&mut IsoSprite> {
        self.sprites.get_mut(handle.key())
    }

    /// Look up a particle manager
    pub fn particles(&self, handle: TypedHandle<EmitterManager>) -> Option<&EmitterManager> {
        self.managers.get(handle.key())
    }

    /// Look up a particle manager mutably
    pub fn particles_mut(
        &mut self,
        handle: TypedHandle<EmitterManager>,
    ) -> Option<&mut EmitterManager> {
        self.managers.get_mut(handle.key())
    }

    /// Number of sprites in the scene
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Per-tick update hook.
    ///
    /// Re-projects every sprite and runs every particle manager's full
    /// tick (projection, emitter updates, depth policy). Call once per
    /// frame, before the host reads placements or builds the draw queue.
    pub fn pre_update(&mut self, delta_ms: f32) {
        for (_, sprite) in &mut self.sprites {
            sprite.pre_update(&self.projector);
        }
        for (_, manager) in &mut self.managers {
            manager.pre_update(&self.projector, delta_ms);
        }
    }

    /// Build the back-to-front draw order for this frame.
    ///
    /// Only valid after `pre_update` has run in the same tick.
    pub fn depth_queue(&self) -> DepthQueue {
        let mut items = Vec::with_capacity(self.sprites.len() + self.managers.len());

        for (key, sprite) in &self.sprites {
            if !sprite.should_render() {
                continue;
            }
            items.push(DrawItem {
                source: DrawSource::Sprite(TypedHandle::new(key)),
                x: sprite.transform.x,
                y: sprite.transform.y,
                depth: sprite.transform.depth,
            });
        }

        for (key, manager) in &self.managers {
            items.push(DrawItem {
                source: DrawSource::Particles(TypedHandle::new(key)),
                x: manager.transform.x,
                y: manager.transform.y,
                depth: manager.transform.depth,
            });
        }

        DepthQueue::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use crate::scene::IsoTransform;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_projection_fails_fast() {
        let config = SceneConfig {
            projection: None,
            ..SceneConfig::default()
        };
        assert!(matches!(
            IsoScene::new(config),
            Err(SceneError::MissingProjection)
        ));
    }

    #[test]
    fn test_added_sprite_is_projected_immediately() {
        let mut scene = IsoScene::new(SceneConfig::default()).expect("default scene");
        let handle = scene.add_sprite(IsoSprite::new(
            "tile",
            IsoTransform::new(Point3::new(10.0, 10.0, 0.0)),
        ));

        let sprite = scene.sprite(handle).expect("sprite present");
        assert_relative_eq!(sprite.transform.depth, 20.0);
    }

    #[test]
    fn test_sprites_inherit_scene_snap() {
        let config = SceneConfig {
            snap: 8.0,
            ..SceneConfig::default()
        };
        let mut scene = IsoScene::new(config).expect("scene");
        let handle = scene.add_sprite(IsoSprite::new(
            "tile",
            IsoTransform::new(Point3::new(3.0, 1.0, 0.0)),
        ));

        let sprite = scene.sprite(handle).expect("sprite present");
        assert_relative_eq!(sprite.transform.snap, 8.0);
        assert_relative_eq!(sprite.transform.x % 8.0, 0.0);
    }

    #[test]
    fn test_depth_queue_orders_back_to_front() {
        let mut scene = IsoScene::new(SceneConfig::default()).expect("scene");
        scene.add_sprite(IsoSprite::new(
            "far",
            IsoTransform::new(Point3::new(20.0, 20.0, 0.0)),
        ));
        scene.add_sprite(IsoSprite::new(
            "near",
            IsoTransform::new(Point3::new(1.0, 1.0, 0.0)),
        ));

        scene.pre_update(16.0);
        let queue = scene.depth_queue();
        assert_eq!(queue.len(), 2);
        assert!(queue.items()[0].depth < queue.items()[1].depth);
    }

    #[test]
    fn test_hidden_sprites_are_not_queued() {
        let mut scene = IsoScene::new(SceneConfig::default()).expect("scene");
        let handle = scene.add_sprite(IsoSprite::new(
            "tile",
            IsoTransform::new(Point3::new(1.0, 1.0, 0.0)),
        ));
        scene
            .sprite_mut(handle)
            .expect("sprite present")
            .visible = false;

        scene.pre_update(16.0);
        assert!(scene.depth_queue().is_empty());
    }

    #[test]
    fn test_scene_config_from_ron() {
        let source = r#"(
            projection: Some((kind: military, anchor: [0.5, 0.0])),
            viewport: [640.0, 480.0],
            snap: 2.0,
        )"#;
        let config = SceneConfig::from_ron_str(source).expect("parse");
        assert_relative_eq!(config.snap, 2.0);
        assert!(config.projection.is_some());
    }

    #[test]
    fn test_scene_config_from_toml() {
        let source = r#"
            viewport = [1024.0, 768.0]
            snap = 0.0

            [projection]
            kind = "true_isometric"
            anchor = [0.5, 0.25]
        "#;
        let config = SceneConfig::from_toml_str(source).expect("parse");
        let projection = config.projection.expect("projection table");
        assert!(matches!(projection.kind, crate::projection::ProjectionKind::TrueIsometric));
        assert_relative_eq!(config.viewport.x, 1024.0);
    }
}
