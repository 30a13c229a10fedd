//! Sprite state switch requests.
//!
//! Triggering a [`SetSpriteStateEvent`] asks the observer to switch the
//! target entity's [`AnimatedSprite`] to another state. Unknown states and
//! entities are logged and otherwise ignored; the sprite keeps playing
//! whatever it was playing.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(set_sprite_state_observer);
//! world.trigger(SetSpriteStateEvent::new(player, "walk"));
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animatedsprite::AnimatedSprite;

/// Request to switch `entity` to the state named `state`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SetSpriteStateEvent {
    pub entity: Entity,
    pub state: String,
}

impl SetSpriteStateEvent {
    pub fn new(entity: Entity, state: impl Into<String>) -> Self {
        Self {
            entity,
            state: state.into(),
        }
    }
}

/// Observer that applies [`SetSpriteStateEvent`]s.
pub fn set_sprite_state_observer(
    trigger: On<SetSpriteStateEvent>,
    mut query: Query<&mut AnimatedSprite>,
) {
    let event = trigger.event();
    match query.get_mut(event.entity) {
        // set_state already logs unknown states
        Ok(mut sprite) => {
            let _ = sprite.set_state(&event.state);
        }
        Err(_) => warn!(
            "SetSpriteStateEvent for entity {:?} without an AnimatedSprite",
            event.entity
        ),
    }
}
