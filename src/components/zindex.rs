//! Z-index component for render ordering.
//!
//! Sprites with higher z-index values are drawn after (on top of) those with
//! lower values. Sprites without a [`ZIndex`] are treated as `ZIndex(0)`.

use bevy_ecs::prelude::Component;

/// Rendering order hint used by [`crate::systems::render::render_pass`].
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
