use bevy_ecs::prelude::Component;

use glam::Vec2;

/// World-space position where a sprite is anchored (top-left of its
/// visible bounding box, whatever the flip).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
