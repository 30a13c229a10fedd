//! Aberred Sprite library.
//!
//! Per-entity sprite animation for the Aberred Engine: named animation
//! states, time-driven frame playback with loop and ping-pong policies, and
//! the flip-aware transform a renderer needs to present the current frame.
//!
//! The crate exposes ECS components, resources, systems and events so hosts
//! and integration tests can drive sprites through a bevy_ecs `World`, plus
//! the [`render::RenderAdapter`] seam for plugging in a drawing backend.

pub mod components;
pub mod error;
pub mod events;
pub mod geometry;
pub mod render;
pub mod resources;
pub mod systems;
