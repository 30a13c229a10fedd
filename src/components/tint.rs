//! Color tint passed through to the renderer.
//!
//! The animation core never interprets the tint; it only carries it from the
//! sprite configuration to the [`RenderAdapter`](crate::render::RenderAdapter)
//! draw calls, where it replaces plain white modulation.

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Color modulation applied by the renderer.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn color(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Rgba<u8>> for Tint {
    fn from(Rgba([r, g, b, a]): Rgba<u8>) -> Self {
        Self::new(r, g, b, a)
    }
}
