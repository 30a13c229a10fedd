//! Event types and observers.
//!
//! Submodules:
//! - [`spritestate`] – request a sprite state switch through an observer
pub mod spritestate;
