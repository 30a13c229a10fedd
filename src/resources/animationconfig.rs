//! Animation configuration resource.
//!
//! Holds the defaults applied to new sprites and the simulation time scale,
//! loaded from an INI file. Missing keys keep their defaults, so an empty or
//! partial file is valid.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! default_frame_duration = 0.1
//! time_scale = 1.0
//!
//! [sprite]
//! width = 32
//! height = 32
//! scale = 1.0
//! flip = none
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::animatedsprite::SpriteConfig;
use crate::components::framesequence::FrameKind;
use crate::components::spritetransform::FlipAxis;
use crate::components::stateregistry::DEFAULT_FRAME_DURATION;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_SPRITE_WIDTH: i32 = 32;
const DEFAULT_SPRITE_HEIGHT: i32 = 32;
const DEFAULT_SPRITE_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Animation configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Frame duration for states registered without one, in seconds.
    pub default_frame_duration: f32,
    /// Multiplier applied to frame deltas by the time system.
    pub time_scale: f32,
    /// Default sprite width in pixels. Always positive when loaded from a file.
    pub sprite_width: i32,
    /// Default sprite height in pixels. Always positive when loaded from a file.
    pub sprite_height: i32,
    /// Default uniform sprite scale.
    pub sprite_scale: f32,
    /// Default flip axis.
    pub flip: FlipAxis,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            default_frame_duration: DEFAULT_FRAME_DURATION,
            time_scale: DEFAULT_TIME_SCALE,
            sprite_width: DEFAULT_SPRITE_WIDTH,
            sprite_height: DEFAULT_SPRITE_HEIGHT,
            sprite_scale: DEFAULT_SPRITE_SCALE,
            flip: FlipAxis::None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)?;

        info!(
            "Loaded config: frame_duration={}, time_scale={}, sprite {}x{} scale={} flip={}",
            self.default_frame_duration,
            self.time_scale,
            self.sprite_width,
            self.sprite_height,
            self.sprite_scale,
            self.flip.as_str()
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        // [animation] section
        if let Some(duration) = config.getfloat("animation", "default_frame_duration")? {
            self.default_frame_duration = duration as f32;
        }
        if let Some(scale) = config.getfloat("animation", "time_scale")? {
            self.time_scale = scale as f32;
        }

        // [sprite] section
        if let Some(width) = sprite_dimension(config, "width")? {
            self.sprite_width = width;
        }
        if let Some(height) = sprite_dimension(config, "height")? {
            self.sprite_height = height;
        }
        if let Some(scale) = config.getfloat("sprite", "scale")? {
            self.sprite_scale = scale as f32;
        }
        if let Some(flip) = config.get("sprite", "flip") {
            match FlipAxis::parse(&flip) {
                Some(axis) => self.flip = axis,
                None => warn!(
                    "Unknown flip value '{}' in config, keeping {}",
                    flip,
                    self.flip.as_str()
                ),
            }
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [animation] section
        config.set(
            "animation",
            "default_frame_duration",
            Some(self.default_frame_duration.to_string()),
        );
        config.set("animation", "time_scale", Some(self.time_scale.to_string()));

        // [sprite] section
        config.set("sprite", "width", Some(self.sprite_width.to_string()));
        config.set("sprite", "height", Some(self.sprite_height.to_string()));
        config.set("sprite", "scale", Some(self.sprite_scale.to_string()));
        config.set("sprite", "flip", Some(self.flip.as_str().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Sprite settings derived from this configuration.
    pub fn sprite_config(&self, frame_kind: FrameKind) -> SpriteConfig {
        SpriteConfig::new(frame_kind)
            .with_size(self.sprite_width, self.sprite_height)
            .with_scale(self.sprite_scale)
            .with_flip(self.flip)
            .with_default_frame_duration(self.default_frame_duration)
    }
}

/// Read a `[sprite]` pixel dimension, rejecting values that are zero or do
/// not fit an `i32`.
fn sprite_dimension(config: &Ini, key: &str) -> Result<Option<i32>, String> {
    let Some(value) = config.getuint("sprite", key)? else {
        return Ok(None);
    };
    match i32::try_from(value) {
        Ok(pixels) if pixels > 0 => Ok(Some(pixels)),
        _ => Err(format!(
            "Invalid sprite {} {}: expected 1 to {}",
            key,
            value,
            i32::MAX
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::new();
        assert_eq!(config.default_frame_duration, 0.1);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.flip, FlipAxis::None);
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_load_from_str_partial() {
        let mut config = AnimationConfig::new();
        let text = "[animation]\ndefault_frame_duration = 0.25\n\n\
                    [sprite]\nflip = horizontal\nwidth = 16\n";
        config.load_from_str(text).unwrap();
        assert_eq!(config.default_frame_duration, 0.25);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.sprite_width, 16);
        assert_eq!(config.sprite_height, 32);
        assert_eq!(config.flip, FlipAxis::Horizontal);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let mut config = AnimationConfig::new();
        assert!(config.load_from_str("[sprite]\nscale = big\n").is_err());
    }

    #[test]
    fn test_out_of_range_size_is_an_error() {
        let mut config = AnimationConfig::new();
        assert!(config.load_from_str("[sprite]\nwidth = 4294967312\n").is_err());
        assert!(config.load_from_str("[sprite]\nheight = 3000000000\n").is_err());
        assert!(config.load_from_str("[sprite]\nwidth = 0\n").is_err());
        assert!(config.load_from_str("[sprite]\nwidth = -4\n").is_err());
        assert_eq!(config.sprite_width, 32);
        assert_eq!(config.sprite_height, 32);

        config.load_from_str("[sprite]\nwidth = 2147483647\n").unwrap();
        assert_eq!(config.sprite_width, i32::MAX);
    }

    #[test]
    fn test_unknown_flip_keeps_current() {
        let mut config = AnimationConfig::new();
        config.load_from_str("[sprite]\nflip = sideways\n").unwrap();
        assert_eq!(config.flip, FlipAxis::None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = AnimationConfig::with_path("/nonexistent/dir/config.ini");
        assert!(config.load_from_file().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.ini");
        let mut saved = AnimationConfig::with_path(&path);
        saved.default_frame_duration = 0.05;
        saved.time_scale = 0.5;
        saved.sprite_width = 24;
        saved.sprite_height = 48;
        saved.sprite_scale = 3.0;
        saved.flip = FlipAxis::Vertical;
        saved.save_to_file().unwrap();

        let mut loaded = AnimationConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_sprite_config() {
        let mut config = AnimationConfig::new();
        config.sprite_scale = -2.0;
        config.flip = FlipAxis::Vertical;
        let sprite = config.sprite_config(FrameKind::Region);
        assert_eq!(sprite.size, IVec2::new(32, 32));
        assert_eq!(sprite.flip, FlipAxis::Vertical);
        assert_eq!(sprite.frame_kind, FrameKind::Region);
        assert_eq!(sprite.default_frame_duration, 0.1);
    }
}
