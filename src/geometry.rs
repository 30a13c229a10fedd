//! Pixel rectangles on top of glam's integer vectors.
//!
//! Positions and scales are plain [`glam::Vec2`], sizes and atlas origins are
//! [`glam::IVec2`]. [`Rectangle`] adds the one shape render backends expect
//! for source rects, so an adapter can convert it field by field.

use glam::IVec2;

/// Axis-aligned pixel rectangle (top-left origin plus size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(origin: IVec2, size: IVec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
        }
    }

    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}
