//! ECS components for animated sprite entities.
//!
//! Submodules overview:
//! - [`animatedsprite`] – the sprite component: states, playback and presentation settings
//! - [`framesequence`] – frame references and the per-state frame sequence
//! - [`mapposition`] – world-space anchor position of a sprite
//! - [`playback`] – playback cursor and the frame-advance state machine
//! - [`spritetransform`] – flip-aware placement and scale for drawing
//! - [`stateregistry`] – named state registry owned by each sprite
//! - [`tint`] – color modulation passed through to the renderer
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animatedsprite;
pub mod framesequence;
pub mod mapposition;
pub mod playback;
pub mod spritetransform;
pub mod stateregistry;
pub mod tint;
pub mod zindex;
