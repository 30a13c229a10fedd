//! Frame references and the immutable per-state frame sequence.
//!
//! A [`FrameRef`] is what the renderer eventually receives: an owned image,
//! the key of a GPU-resident texture, or the origin of a region inside the
//! sprite's shared sheet. A [`FrameSequence`] bundles the ordered frames of
//! one state with its pacing and [`PlayMode`].

use std::sync::Arc;

use glam::IVec2;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Opaque reference to one displayable frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameRef {
    /// Owned raster image.
    Image(Arc<RgbaImage>),
    /// Key of a renderable already uploaded by the host.
    Texture(Arc<str>),
    /// Top-left origin of a `size`-sized region in the sprite's sheet.
    Region(IVec2),
}

impl FrameRef {
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameRef::Image(_) => FrameKind::Image,
            FrameRef::Texture(_) => FrameKind::Texture,
            FrameRef::Region(_) => FrameKind::Region,
        }
    }

    pub fn region(x: i32, y: i32) -> Self {
        FrameRef::Region(IVec2::new(x, y))
    }

    pub fn texture(key: impl Into<Arc<str>>) -> Self {
        FrameRef::Texture(key.into())
    }
}

/// The kind of [`FrameRef`] a sprite works with. Fixed per sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Image,
    Texture,
    #[default]
    Region,
}

/// How playback behaves when it reaches the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Wrap from the last frame back to the first.
    #[default]
    Loop,
    /// Bounce between the ends without repeating the end frames.
    PingPong,
}

/// Ordered frames of one animation state plus their pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Vec<FrameRef>,
    frame_duration: f32,
    play_mode: PlayMode,
}

impl FrameSequence {
    /// Returns `None` when `frames` is empty.
    pub fn new(frames: Vec<FrameRef>, frame_duration: f32, play_mode: PlayMode) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            frame_duration,
            play_mode,
        })
    }

    pub fn frames(&self) -> &[FrameRef] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false for a constructed sequence; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&FrameRef> {
        self.frames.get(index)
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Kind of the first frame that differs from `expected`, if any.
    pub(crate) fn mismatched_kind(&self, expected: FrameKind) -> Option<FrameKind> {
        self.frames
            .iter()
            .map(FrameRef::kind)
            .find(|kind| *kind != expected)
    }
}
