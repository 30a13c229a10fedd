//! Data-driven sprite sheet definitions.
//!
//! The store keeps reusable sheet definitions keyed by name, typically loaded
//! from JSON. A definition is only a template: [`AnimationStore::instantiate`]
//! builds a brand new [`AnimatedSprite`] with its own registry and cursor, so
//! entities spawned from the same sheet never share playback state.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "hero": {
//!     "kind": "region",
//!     "sheet": "hero_sheet",
//!     "width": 32,
//!     "height": 32,
//!     "initial_state": "idle",
//!     "states": [
//!       { "name": "idle", "frames": [[0, 0], [32, 0]] },
//!       { "name": "walk", "frame_duration": 0.08, "mode": "ping_pong",
//!         "frames": [[0, 32], [32, 32], [64, 32]] }
//!     ]
//!   }
//! }
//! ```
//!
//! Frames are `[x, y]` sheet origins for `region` sheets and texture keys
//! for `texture` sheets. Omitted durations use the configured default.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::IVec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::animatedsprite::{AnimatedSprite, SpriteSheet};
use crate::components::framesequence::{FrameKind, FrameRef, PlayMode};
use crate::error::SpriteError;
use crate::resources::animationconfig::AnimationConfig;

/// Failures while loading or instantiating sheets.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read sheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sheet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sheet '{0}' is not loaded")]
    UnknownSheet(String),
    #[error("sheet '{sheet}': {axis} {value} is not a valid sprite size")]
    InvalidSize {
        sheet: String,
        axis: &'static str,
        value: u32,
    },
    #[error("sheet '{sheet}': {source}")]
    Sprite {
        sheet: String,
        #[source]
        source: SpriteError,
    },
}

/// One frame entry in a state definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameDef {
    Origin([i32; 2]),
    Texture(String),
}

impl FrameDef {
    fn to_frame(&self) -> FrameRef {
        match self {
            FrameDef::Origin(origin) => FrameRef::Region(IVec2::from(*origin)),
            FrameDef::Texture(key) => FrameRef::texture(key.as_str()),
        }
    }
}

/// One animation state in a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_duration: Option<f32>,
    #[serde(default)]
    pub mode: PlayMode,
    pub frames: Vec<FrameDef>,
}

/// Template for building animated sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDef {
    #[serde(default)]
    pub kind: FrameKind,
    /// Texture key of the shared sheet, for `region` sprites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<String>,
    pub states: Vec<StateDef>,
}

/// Registry of sheet definitions keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub sheets: FxHashMap<String, SheetDef>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, sheet: SheetDef) {
        self.sheets.insert(key.into(), sheet);
    }

    pub fn get(&self, key: &str) -> Option<&SheetDef> {
        self.sheets.get(key)
    }

    /// Parse a JSON object of sheets and add them, replacing same-named ones.
    /// Returns how many sheets were read.
    pub fn load_json_str(&mut self, json: &str) -> Result<usize, SheetError> {
        let sheets: FxHashMap<String, SheetDef> = serde_json::from_str(json)?;
        let count = sheets.len();
        for (key, sheet) in sheets {
            debug!("Loaded sheet '{}' with {} states", key, sheet.states.len());
            self.sheets.insert(key, sheet);
        }
        Ok(count)
    }

    pub fn load_json_file(&mut self, path: impl AsRef<Path>) -> Result<usize, SheetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let count = self.load_json_str(&text)?;
        info!("Loaded {} sheet(s) from {}", count, path.display());
        Ok(count)
    }

    /// Build a fresh sprite from the sheet `key`.
    pub fn instantiate(
        &self,
        key: &str,
        config: &AnimationConfig,
    ) -> Result<AnimatedSprite, SheetError> {
        let def = self
            .get(key)
            .ok_or_else(|| SheetError::UnknownSheet(key.to_string()))?;
        let wrap = |source: SpriteError| SheetError::Sprite {
            sheet: key.to_string(),
            source,
        };

        let mut sprite_config = config.sprite_config(def.kind);
        if let Some(width) = def.width {
            sprite_config.size.x = sheet_dimension(key, "width", width)?;
        }
        if let Some(height) = def.height {
            sprite_config.size.y = sheet_dimension(key, "height", height)?;
        }

        let mut sprite = AnimatedSprite::new(sprite_config);
        if let Some(sheet) = &def.sheet {
            sprite.set_sheet(SpriteSheet::Texture(sheet.as_str().into()));
        }

        for state in &def.states {
            let frames = state.frames.iter().map(FrameDef::to_frame).collect();
            let duration = state
                .frame_duration
                .unwrap_or(sprite.registry().default_frame_duration());
            sprite
                .register_state(state.name.clone(), duration, state.mode, frames)
                .map_err(wrap)?;
        }

        if let Some(initial) = &def.initial_state {
            sprite.set_state(initial).map_err(wrap)?;
        }

        Ok(sprite)
    }
}

fn sheet_dimension(sheet: &str, axis: &'static str, value: u32) -> Result<i32, SheetError> {
    i32::try_from(value)
        .ok()
        .filter(|pixels| *pixels > 0)
        .ok_or_else(|| SheetError::InvalidSize {
            sheet: sheet.to_string(),
            axis,
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HERO: &str = r#"{
        "hero": {
            "kind": "region",
            "sheet": "hero_sheet",
            "width": 16,
            "height": 24,
            "initial_state": "idle",
            "states": [
                { "name": "idle", "frames": [[0, 0], [16, 0]] },
                { "name": "walk", "frame_duration": 0.05, "mode": "ping_pong",
                  "frames": [[0, 24], [16, 24], [32, 24]] }
            ]
        },
        "coin": {
            "kind": "texture",
            "states": [ { "name": "spin", "frames": ["coin_0", "coin_1"] } ]
        }
    }"#;

    #[test]
    fn test_load_and_instantiate() {
        let mut store = AnimationStore::new();
        assert_eq!(store.load_json_str(HERO).unwrap(), 2);

        let sprite = store.instantiate("hero", &AnimationConfig::new()).unwrap();
        assert_eq!(sprite.size(), IVec2::new(16, 24));
        assert_eq!(sprite.state(), Some("idle"));
        assert_eq!(sprite.frame_kind(), FrameKind::Region);
        assert_eq!(
            sprite.sheet(),
            Some(&SpriteSheet::Texture("hero_sheet".into()))
        );

        let walk = sprite.registry().lookup("walk").unwrap();
        assert_eq!(walk.play_mode(), PlayMode::PingPong);
        assert_eq!(walk.frame_duration(), 0.05);
        assert_eq!(walk.frame(2), Some(&FrameRef::region(32, 24)));

        let idle = sprite.registry().lookup("idle").unwrap();
        assert_eq!(idle.play_mode(), PlayMode::Loop);
        assert_eq!(idle.frame_duration(), 0.1);
    }

    #[test]
    fn test_texture_sheet_uses_config_defaults() {
        let mut store = AnimationStore::new();
        store.load_json_str(HERO).unwrap();
        let mut config = AnimationConfig::new();
        config.default_frame_duration = 0.2;

        let mut coin = store.instantiate("coin", &config).unwrap();
        assert_eq!(coin.size(), IVec2::new(32, 32));
        assert_eq!(coin.state(), None);
        coin.set_state("spin").unwrap();
        assert_eq!(coin.tick(0.2).unwrap(), &FrameRef::texture("coin_1"));
    }

    #[test]
    fn test_instances_do_not_share_cursor() {
        let mut store = AnimationStore::new();
        store.load_json_str(HERO).unwrap();
        let config = AnimationConfig::new();
        let mut a = store.instantiate("hero", &config).unwrap();
        let b = store.instantiate("hero", &config).unwrap();
        a.tick(0.1).unwrap();
        assert_eq!(a.frame_index(), 1);
        assert_eq!(b.frame_index(), 0);
    }

    #[test]
    fn test_unknown_sheet() {
        let store = AnimationStore::new();
        let err = store.instantiate("ghost", &AnimationConfig::new()).unwrap_err();
        assert!(matches!(err, SheetError::UnknownSheet(k) if k == "ghost"));
    }

    #[test]
    fn test_empty_state_is_reported() {
        let mut store = AnimationStore::new();
        store
            .load_json_str(r#"{ "bad": { "states": [ { "name": "idle", "frames": [] } ] } }"#)
            .unwrap();
        let err = store.instantiate("bad", &AnimationConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Sprite { source: SpriteError::EmptySequence(ref s), .. } if s == "idle"
        ));
    }

    #[test]
    fn test_mixed_frames_are_reported() {
        let mut store = AnimationStore::new();
        let json = r#"{ "bad": { "kind": "region",
            "states": [ { "name": "idle", "frames": [[0, 0], "oops"] } ] } }"#;
        store.load_json_str(json).unwrap();
        let err = store.instantiate("bad", &AnimationConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Sprite { source: SpriteError::FrameKindMismatch { .. }, .. }
        ));
    }

    #[test]
    fn test_unknown_initial_state_is_reported() {
        let mut store = AnimationStore::new();
        let json = r#"{ "bad": { "initial_state": "run",
            "states": [ { "name": "idle", "frames": [[0, 0]] } ] } }"#;
        store.load_json_str(json).unwrap();
        let err = store.instantiate("bad", &AnimationConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Sprite { source: SpriteError::UnknownState(_), .. }
        ));
    }

    #[test]
    fn test_oversized_dimensions_are_reported() {
        let mut store = AnimationStore::new();
        let json = r#"{
            "wide": { "width": 3000000000, "height": 16,
                      "states": [ { "name": "idle", "frames": [[0, 0]] } ] },
            "flat": { "width": 16, "height": 0,
                      "states": [ { "name": "idle", "frames": [[0, 0]] } ] },
            "max": { "width": 2147483647, "height": 1,
                     "states": [ { "name": "idle", "frames": [[0, 0]] } ] }
        }"#;
        store.load_json_str(json).unwrap();
        let config = AnimationConfig::new();

        let err = store.instantiate("wide", &config).unwrap_err();
        assert!(matches!(
            err,
            SheetError::InvalidSize {
                ref sheet,
                axis: "width",
                value: 3_000_000_000,
            } if sheet == "wide"
        ));
        let err = store.instantiate("flat", &config).unwrap_err();
        assert!(matches!(err, SheetError::InvalidSize { axis: "height", value: 0, .. }));

        let sprite = store.instantiate("max", &config).unwrap();
        assert_eq!(sprite.size(), IVec2::new(i32::MAX, 1));
    }

    #[test]
    fn test_invalid_json() {
        let mut store = AnimationStore::new();
        assert!(matches!(
            store.load_json_str("{ not json"),
            Err(SheetError::Json(_))
        ));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HERO.as_bytes()).unwrap();
        let mut store = AnimationStore::new();
        assert_eq!(store.load_json_file(file.path()).unwrap(), 2);
        assert!(store.get("coin").is_some());
        assert!(matches!(
            store.load_json_file("/nonexistent/sheets.json"),
            Err(SheetError::Io(_))
        ));
    }
}
