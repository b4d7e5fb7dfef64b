//! Depth-ordered draw queue
//!
//! Collects placement snapshots of the scene's objects and orders them
//! back-to-front for the host renderer. Ordering is stable: objects with
//! equal depth keep the order they were collected in.

use crate::foundation::collections::TypedHandle;
use crate::particles::EmitterManager;
use crate::scene::IsoSprite;

/// Identifies the scene object behind a [`DrawItem`]
#[derive(Debug, Clone)]
pub enum DrawSource {
    /// An iso sprite
    Sprite(TypedHandle<IsoSprite>),
    /// A particle emitter manager
    Particles(TypedHandle<EmitterManager>),
}

/// A placement snapshot queued for drawing
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Which scene object this placement belongs to
    pub source: DrawSource,
    /// Screen x
    pub x: f32,
    /// Screen y
    pub y: f32,
    /// Back-to-front sort key
    pub depth: f32,
}

/// Back-to-front draw order for a frame
#[derive(Debug, Default)]
pub struct DepthQueue {
    items: Vec<DrawItem>,
}

impl DepthQueue {
    /// Build a queue from collected placements, sorted ascending by depth
    pub fn from_items(mut items: Vec<DrawItem>) -> Self {
        // sort_by is stable; equal depths preserve collection order
        items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { items }
    }

    /// Ordered items, back to front
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::HandleMap;

    fn item(map: &mut HandleMap<IsoSprite>, x: f32, depth: f32) -> DrawItem {
        use crate::foundation::math::Point3;
        use crate::scene::IsoTransform;

        let key = map.insert(IsoSprite::new(
            "tile",
            IsoTransform::new(Point3::new(0.0, 0.0, 0.0)),
        ));
        DrawItem {
            source: DrawSource::Sprite(TypedHandle::new(key)),
            x,
            y: 0.0,
            depth,
        }
    }

    #[test]
    fn test_sorted_ascending_by_depth() {
        let mut map = HandleMap::default();
        let queue = DepthQueue::from_items(vec![
            item(&mut map, 0.0, 30.0),
            item(&mut map, 1.0, 10.0),
            item(&mut map, 2.0, 20.0),
        ]);

        let depths: Vec<f32> = queue.items().iter().map(|i| i.depth).collect();
        assert_eq!(depths, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_equal_depths_preserve_collection_order() {
        let mut map = HandleMap::default();
        let queue = DepthQueue::from_items(vec![
            item(&mut map, 0.0, 10.0),
            item(&mut map, 1.0, 10.0),
            item(&mut map, 2.0, 5.0),
            item(&mut map, 3.0, 10.0),
        ]);

        let xs: Vec<f32> = queue.items().iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![2.0, 0.0, 1.0, 3.0]);
    }
}
