//! Animation system.
//!
//! [`animation`] advances every [`AnimatedSprite`] by the scaled frame delta
//! held in [`WorldTime`]. Each sprite owns its own registry and cursor, so the
//! system only forwards time; all boundary policy lives in
//! [`PlaybackCursor`](crate::components::playback::PlaybackCursor).
//!
//! # Animation Flow
//!
//! 1. States are registered on the sprite directly or through
//!    [`AnimationStore::instantiate`](crate::resources::animationstore::AnimationStore::instantiate)
//! 2. A state is selected with `set_state` or a
//!    [`SetSpriteStateEvent`](crate::events::spritestate::SetSpriteStateEvent)
//! 3. This system ticks each sprite once per frame
//! 4. [`render_pass`](crate::systems::render::render_pass) draws the current frame

use bevy_ecs::prelude::*;
use log::error;

use crate::components::animatedsprite::AnimatedSprite;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback of all sprites.
///
/// Sprites that have not selected a state yet are left alone.
pub fn animation(mut query: Query<&mut AnimatedSprite>, time: Res<WorldTime>) {
    for mut sprite in query.iter_mut() {
        if sprite.state().is_none() {
            continue;
        }
        if let Err(e) = sprite.tick(time.delta) {
            error!("Animation tick failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animatedsprite::SpriteConfig;
    use crate::components::framesequence::{FrameKind, FrameRef, PlayMode};

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    fn sprite(frames: i32, mode: PlayMode) -> AnimatedSprite {
        let mut s = AnimatedSprite::new(SpriteConfig::new(FrameKind::Region).with_size(8, 8));
        let frames = (0..frames).map(|i| FrameRef::region(i * 8, 0)).collect();
        s.register_state("run", 0.1, mode, frames).unwrap();
        s
    }

    #[test]
    fn test_ticks_active_sprites_only() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..Default::default()
        });
        let mut active = sprite(3, PlayMode::Loop);
        active.set_state("run").unwrap();
        let a = world.spawn(active).id();
        let idle = world.spawn(sprite(3, PlayMode::Loop)).id();

        run(&mut world);
        run(&mut world);

        assert_eq!(world.get::<AnimatedSprite>(a).unwrap().frame_index(), 2);
        let idle = world.get::<AnimatedSprite>(idle).unwrap();
        assert_eq!(idle.frame_index(), 0);
        assert_eq!(idle.state(), None);
    }
}
