//! Animated sprite component.
//!
//! [`AnimatedSprite`] is the caller-facing surface of the animation core. It
//! owns a [`StateRegistry`] and a [`PlaybackCursor`] exclusively, together with
//! the per-instance presentation settings (size, scale, flip, tint) and, for
//! sheet-based sprites, the shared sheet plus a private placeholder image
//! that is only allocated once a region has to be copied on the CPU.
//!
//! # Usage
//!
//! ```
//! use aberredsprite::components::animatedsprite::{AnimatedSprite, SpriteConfig};
//! use aberredsprite::components::framesequence::{FrameKind, FrameRef, PlayMode};
//!
//! let mut sprite = AnimatedSprite::new(SpriteConfig::new(FrameKind::Region));
//! let frames = (0..4).map(|i| FrameRef::region(i * 32, 0)).collect();
//! sprite.register_state("walk", 0.1, PlayMode::Loop, frames).unwrap();
//! sprite.set_state("walk").unwrap();
//! assert_eq!(sprite.tick(0.1).unwrap(), &FrameRef::region(32, 0));
//! ```
//!
//! # Related
//!
//! - [`crate::systems::animation::animation`] – ticks every sprite from
//!   [`WorldTime`](crate::resources::worldtime::WorldTime)
//! - [`crate::systems::render::render_pass`] – hands the current frame to a renderer
//! - [`crate::events::spritestate::SetSpriteStateEvent`] – switch state through an observer

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage, imageops};
use log::{debug, warn};

use crate::components::framesequence::{FrameKind, FrameRef, PlayMode};
use crate::components::playback::PlaybackCursor;
use crate::components::spritetransform::{FlipAxis, SpriteTransform};
use crate::components::stateregistry::{DEFAULT_FRAME_DURATION, StateRegistry};
use crate::components::tint::Tint;
use crate::error::SpriteError;
use crate::geometry::Rectangle;

/// Shared source that `Region` frames point into.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteSheet {
    /// Decoded pixels held on the CPU.
    Image(Arc<RgbaImage>),
    /// Key of a texture owned by the renderer.
    Texture(Arc<str>),
}

/// Per-instance settings, independent of the registered states.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteConfig {
    pub size: IVec2,
    pub scale: f32,
    pub flip: FlipAxis,
    pub frame_kind: FrameKind,
    pub tint: Tint,
    pub default_frame_duration: f32,
}

impl SpriteConfig {
    pub fn new(frame_kind: FrameKind) -> Self {
        Self {
            size: IVec2::ZERO,
            scale: 1.0,
            flip: FlipAxis::None,
            frame_kind,
            tint: Tint::default(),
            default_frame_duration: DEFAULT_FRAME_DURATION,
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = IVec2::new(width, height);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_flip(mut self, flip: FlipAxis) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_default_frame_duration(mut self, frame_duration: f32) -> Self {
        self.default_frame_duration = frame_duration;
        self
    }
}

/// Sprite driven by a per-instance animation state machine.
#[derive(Component, Debug, Clone)]
pub struct AnimatedSprite {
    registry: StateRegistry,
    cursor: PlaybackCursor,
    size: IVec2,
    scale: f32,
    flip: FlipAxis,
    tint: Tint,
    sheet: Option<SpriteSheet>,
    placeholder: Option<RgbaImage>,
}

impl AnimatedSprite {
    pub fn new(config: SpriteConfig) -> Self {
        let mut sprite = Self {
            registry: StateRegistry::new(config.frame_kind)
                .with_default_duration(config.default_frame_duration),
            cursor: PlaybackCursor::new(),
            size: config.size,
            scale: 1.0,
            flip: config.flip,
            tint: config.tint,
            sheet: None,
            placeholder: None,
        };
        sprite.set_scale(config.scale);
        sprite
    }

    pub fn with_sheet(mut self, sheet: SpriteSheet) -> Self {
        self.set_sheet(sheet);
        self
    }

    /// Register (or replace) a state.
    ///
    /// Replacing the active state rewinds playback to its first frame so the
    /// cursor never points past the end of the new sequence.
    pub fn register_state(
        &mut self,
        name: impl Into<String>,
        frame_duration: f32,
        play_mode: PlayMode,
        frames: Vec<FrameRef>,
    ) -> Result<(), SpriteError> {
        let name = name.into();
        self.registry
            .register(name.clone(), frame_duration, play_mode, frames)?;
        self.after_register(&name);
        Ok(())
    }

    /// Register a looping state with the configured default frame duration.
    pub fn register_state_default(
        &mut self,
        name: impl Into<String>,
        frames: Vec<FrameRef>,
    ) -> Result<(), SpriteError> {
        let name = name.into();
        self.registry.register_default(name.clone(), frames)?;
        self.after_register(&name);
        Ok(())
    }

    fn after_register(&mut self, name: &str) {
        if self.cursor.active_state() == Some(name) {
            self.cursor.rewind();
        }
    }

    /// Switch to `name`. Switching to the active state keeps playback going.
    pub fn set_state(&mut self, name: &str) -> Result<(), SpriteError> {
        match self.cursor.set_state(&self.registry, name) {
            Ok(()) => {
                debug!("Sprite state set to '{}'", name);
                Ok(())
            }
            Err(e) => {
                warn!("Cannot set sprite state: {}", e);
                Err(e)
            }
        }
    }

    /// Name of the active state, if one was selected.
    pub fn state(&self) -> Option<&str> {
        self.cursor.active_state()
    }

    /// Advance playback by `elapsed` seconds and return the frame to show.
    pub fn tick(&mut self, elapsed: f32) -> Result<&FrameRef, SpriteError> {
        self.cursor.advance(&self.registry, elapsed)
    }

    pub fn current_frame(&self) -> Result<&FrameRef, SpriteError> {
        self.cursor.current_frame(&self.registry)
    }

    pub fn frame_index(&self) -> usize {
        self.cursor.frame_index()
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn frame_kind(&self) -> FrameKind {
        self.registry.kind()
    }

    /// Set the display size. An already allocated placeholder is
    /// reallocated to match.
    pub fn set_size(&mut self, size: IVec2) {
        self.size = size;
        if self.placeholder.is_some() {
            self.placeholder = Some(blank_placeholder(size));
        }
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Set the uniform scale factor. Values `<= 0` fall back to `1.0`.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale > 0.0 { scale } else { 1.0 };
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_flip(&mut self, flip: FlipAxis) {
        self.flip = flip;
    }

    pub fn flip(&self) -> FlipAxis {
        self.flip
    }

    pub fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn set_sheet(&mut self, sheet: SpriteSheet) {
        if self.frame_kind() != FrameKind::Region {
            warn!(
                "Sheet assigned to a sprite using {:?} frames; it will not be used",
                self.frame_kind()
            );
        }
        self.sheet = Some(sheet);
    }

    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_ref()
    }

    /// Transform for drawing the sprite at `position`.
    pub fn transform(&self, position: Vec2) -> SpriteTransform {
        SpriteTransform::compute(self.size, self.scale, self.flip, position)
    }

    /// Sheet rectangle of the current frame, for `Region` sprites.
    pub fn source_region(&self) -> Option<Rectangle> {
        match self.current_frame() {
            Ok(FrameRef::Region(origin)) => Some(Rectangle::new(*origin, self.size)),
            _ => None,
        }
    }

    /// The placeholder image, once [`fill_placeholder`](Self::fill_placeholder)
    /// has allocated it.
    pub fn placeholder(&self) -> Option<&RgbaImage> {
        self.placeholder.as_ref()
    }

    /// Copy the current region of an image sheet into the placeholder.
    ///
    /// Returns `None` when the sprite has no image sheet or the current
    /// frame is not a region. Pixels outside the sheet stay transparent.
    pub fn fill_placeholder(&mut self) -> Option<&RgbaImage> {
        let region = self.source_region()?;
        let Some(SpriteSheet::Image(sheet)) = &self.sheet else {
            return None;
        };
        let size = self.size;
        let placeholder = self.placeholder.get_or_insert_with(|| blank_placeholder(size));
        for pixel in placeholder.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        imageops::replace(
            placeholder,
            &**sheet,
            -i64::from(region.x),
            -i64::from(region.y),
        );
        Some(&*placeholder)
    }
}

fn blank_placeholder(size: IVec2) -> RgbaImage {
    let dims = size.max(IVec2::ZERO).as_uvec2();
    RgbaImage::new(dims.x, dims.y)
}
