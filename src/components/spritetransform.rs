//! Placement and scale handed to the renderer for one sprite draw.
//!
//! Flipping is expressed as a negative scale on one axis. A negative scale
//! mirrors the image around its origin, so the draw position is pushed by
//! the scaled sprite extent on that axis to keep the visible bounding box
//! anchored at the requested position.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis along which the sprite is mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl FlipAxis {
    /// Parse the names used in config files. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(FlipAxis::None),
            "horizontal" | "h" => Some(FlipAxis::Horizontal),
            "vertical" | "v" => Some(FlipAxis::Vertical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlipAxis::None => "none",
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
        }
    }
}

/// Where and how large to draw the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteTransform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl SpriteTransform {
    /// Compute the transform for a sprite of `size` pixels drawn at
    /// `position` with a uniform `scale` (assumed > 0).
    pub fn compute(size: IVec2, scale: f32, flip: FlipAxis, position: Vec2) -> Self {
        let size = size.as_vec2();
        match flip {
            FlipAxis::None => Self {
                position,
                scale: Vec2::splat(scale),
            },
            FlipAxis::Horizontal => Self {
                position: position + Vec2::new(size.x * scale, 0.0),
                scale: Vec2::new(-scale, scale),
            },
            FlipAxis::Vertical => Self {
                position: position + Vec2::new(0.0, size.y * scale),
                scale: Vec2::new(scale, -scale),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flip() {
        let t = SpriteTransform::compute(
            IVec2::new(32, 32),
            2.0,
            FlipAxis::None,
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(t.position, Vec2::new(10.0, 10.0));
        assert_eq!(t.scale, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_horizontal_flip_anchors_left_edge() {
        let t = SpriteTransform::compute(
            IVec2::new(32, 32),
            2.0,
            FlipAxis::Horizontal,
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(t.position, Vec2::new(74.0, 10.0));
        assert_eq!(t.scale, Vec2::new(-2.0, 2.0));
    }

    #[test]
    fn test_vertical_flip_anchors_top_edge() {
        let t = SpriteTransform::compute(
            IVec2::new(16, 24),
            1.5,
            FlipAxis::Vertical,
            Vec2::new(-4.0, 2.0),
        );
        assert_eq!(t.position, Vec2::new(-4.0, 38.0));
        assert_eq!(t.scale, Vec2::new(1.5, -1.5));
    }

    #[test]
    fn test_flip_parse() {
        assert_eq!(FlipAxis::parse("none"), Some(FlipAxis::None));
        assert_eq!(FlipAxis::parse(" Horizontal "), Some(FlipAxis::Horizontal));
        assert_eq!(FlipAxis::parse("v"), Some(FlipAxis::Vertical));
        assert_eq!(FlipAxis::parse("diagonal"), None);
        assert_eq!(FlipAxis::parse(FlipAxis::Vertical.as_str()), Some(FlipAxis::Vertical));
    }
}
