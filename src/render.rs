//! Boundary with the drawing backend.
//!
//! The animation core never issues draw calls itself. A host implements
//! [`RenderAdapter`] on top of its graphics library and hands it to
//! [`render_pass`](crate::systems::render::render_pass), which resolves the
//! current frame of every sprite and calls back into the adapter.
//!
//! [`RecordingRenderer`] is a backend-free adapter that stores every call as
//! a [`DrawCommand`]. The CLI prints these, and tests assert on them.

use glam::IVec2;
use image::RgbaImage;

use crate::components::spritetransform::{FlipAxis, SpriteTransform};
use crate::components::tint::Tint;
use crate::geometry::Rectangle;

/// Something an adapter can draw from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawSource<'a> {
    /// CPU pixels owned by the caller.
    Image(&'a RgbaImage),
    /// Key of a texture the backend already holds.
    Texture(&'a str),
}

/// Sink for sprite draws.
pub trait RenderAdapter {
    /// Whether [`draw_region`](Self::draw_region) is available. Adapters that
    /// return `false` receive sheet frames already copied into a full image.
    fn supports_partial_draw(&self) -> bool {
        true
    }

    /// Draw a whole frame.
    fn draw(
        &mut self,
        source: DrawSource<'_>,
        transform: &SpriteTransform,
        flip: FlipAxis,
        tint: Tint,
    );

    /// Draw `region` of a shared sheet, scaled to `target_size` before the
    /// transform is applied.
    fn draw_region(
        &mut self,
        source: DrawSource<'_>,
        region: Rectangle,
        target_size: IVec2,
        transform: &SpriteTransform,
        tint: Tint,
    );
}

/// Owned copy of a [`DrawSource`], as stored by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedSource {
    Image(RgbaImage),
    Texture(String),
}

impl From<DrawSource<'_>> for RecordedSource {
    fn from(source: DrawSource<'_>) -> Self {
        match source {
            DrawSource::Image(img) => RecordedSource::Image(img.clone()),
            DrawSource::Texture(key) => RecordedSource::Texture(key.to_string()),
        }
    }
}

/// One recorded adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Frame {
        source: RecordedSource,
        transform: SpriteTransform,
        flip: FlipAxis,
        tint: Tint,
    },
    Region {
        source: RecordedSource,
        region: Rectangle,
        target_size: IVec2,
        transform: SpriteTransform,
        tint: Tint,
    },
}

/// Adapter that records calls instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
    partial_draw: bool,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecordingRenderer {
    pub fn new(partial_draw: bool) -> Self {
        Self {
            commands: Vec::new(),
            partial_draw,
        }
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderAdapter for RecordingRenderer {
    fn supports_partial_draw(&self) -> bool {
        self.partial_draw
    }

    fn draw(
        &mut self,
        source: DrawSource<'_>,
        transform: &SpriteTransform,
        flip: FlipAxis,
        tint: Tint,
    ) {
        self.commands.push(DrawCommand::Frame {
            source: source.into(),
            transform: *transform,
            flip,
            tint,
        });
    }

    fn draw_region(
        &mut self,
        source: DrawSource<'_>,
        region: Rectangle,
        target_size: IVec2,
        transform: &SpriteTransform,
        tint: Tint,
    ) {
        self.commands.push(DrawCommand::Region {
            source: source.into(),
            region,
            target_size,
            transform: *transform,
            tint,
        });
    }
}
