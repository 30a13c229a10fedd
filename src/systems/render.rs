//! Render pass.
//!
//! Resolves the current frame of every positioned [`AnimatedSprite`] and
//! hands it to a [`RenderAdapter`] together with the flip-aware
//! [`SpriteTransform`](crate::components::spritetransform::SpriteTransform).
//! Drawing never advances playback; time only moves in
//! [`animation`](crate::systems::animation::animation).
//!
//! Sheet (`Region`) frames are drawn with
//! [`RenderAdapter::draw_region`] when the adapter supports partial draws.
//! Otherwise the region is copied into the sprite's placeholder image and
//! drawn as a whole frame, which yields the same pixels. Only that copy
//! takes mutable access to the sprite.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{error, warn};

use crate::components::animatedsprite::{AnimatedSprite, SpriteSheet};
use crate::components::framesequence::FrameRef;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::geometry::Rectangle;
use crate::render::{DrawSource, RenderAdapter};

type Drawable = (With<AnimatedSprite>, With<MapPosition>);

/// Draw all sprites that have a [`MapPosition`], lowest [`ZIndex`] first.
///
/// Sprites without an active state are skipped.
pub fn render_pass(world: &mut World, renderer: &mut dyn RenderAdapter) {
    let mut to_draw: Vec<(Entity, ZIndex)> = {
        let mut q = world.query_filtered::<(Entity, Option<&ZIndex>), Drawable>();
        q.iter(world)
            .map(|(entity, z)| (entity, z.copied().unwrap_or_default()))
            .collect()
    };

    to_draw.sort_by_key(|(_, z)| *z);

    let partial = renderer.supports_partial_draw();
    for (entity, _z) in to_draw {
        let Some(pos) = world.get::<MapPosition>(entity).copied() else {
            continue;
        };
        let needs_copy = match world.get::<AnimatedSprite>(entity) {
            Some(sprite) => draw_sprite(sprite, pos.pos, renderer, partial),
            None => false,
        };
        if needs_copy {
            if let Some(mut sprite) = world.get_mut::<AnimatedSprite>(entity) {
                draw_placeholder(&mut sprite, pos.pos, renderer);
            }
        }
    }
}

/// Draw everything that needs no pixel copy. Returns `true` when the frame is
/// a region of an image sheet that must go through the placeholder.
fn draw_sprite(
    sprite: &AnimatedSprite,
    position: Vec2,
    renderer: &mut dyn RenderAdapter,
    partial: bool,
) -> bool {
    let Ok(frame) = sprite.current_frame() else {
        return false;
    };
    let transform = sprite.transform(position);
    let flip = sprite.flip();
    let tint = sprite.tint();

    match frame {
        FrameRef::Image(image) => {
            renderer.draw(DrawSource::Image(image), &transform, flip, tint);
        }
        FrameRef::Texture(key) => {
            renderer.draw(DrawSource::Texture(key), &transform, flip, tint);
        }
        FrameRef::Region(origin) => {
            let size = sprite.size();
            let region = Rectangle::new(*origin, size);
            match sprite.sheet() {
                None => warn!(
                    "Sprite in state {:?} has region frames but no sheet",
                    sprite.state()
                ),
                Some(SpriteSheet::Image(sheet)) if partial => {
                    renderer.draw_region(DrawSource::Image(sheet), region, size, &transform, tint);
                }
                Some(SpriteSheet::Texture(key)) if partial => {
                    renderer.draw_region(DrawSource::Texture(key), region, size, &transform, tint);
                }
                Some(SpriteSheet::Image(_)) => return true,
                Some(SpriteSheet::Texture(key)) => error!(
                    "Renderer cannot draw regions of texture sheet '{}'; sprite skipped",
                    key
                ),
            }
        }
    }
    false
}

fn draw_placeholder(
    sprite: &mut AnimatedSprite,
    position: Vec2,
    renderer: &mut dyn RenderAdapter,
) {
    let transform = sprite.transform(position);
    let flip = sprite.flip();
    let tint = sprite.tint();
    if let Some(placeholder) = sprite.fill_placeholder() {
        renderer.draw(DrawSource::Image(placeholder), &transform, flip, tint);
    }
}
