//! ECS systems for animated sprites.
//!
//! Submodules overview
//! - [`animation`] – advance sprite playback by the world delta
//! - [`render`] – hand current frames and transforms to a render adapter
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod render;
pub mod time;
