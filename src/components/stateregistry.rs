//! Per-sprite registry of named animation states.
//!
//! Each [`AnimatedSprite`](crate::components::animatedsprite::AnimatedSprite)
//! owns one registry. Entries are only ever added or overwritten; there is no
//! removal, so a state stays valid for the sprite's whole lifetime.

use log::warn;
use rustc_hash::FxHashMap;

use crate::components::framesequence::{FrameKind, FrameRef, FrameSequence, PlayMode};
use crate::error::SpriteError;

/// Frame duration used when a state is registered without one.
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// Mapping from state name to its [`FrameSequence`].
#[derive(Debug, Clone)]
pub struct StateRegistry {
    states: FxHashMap<String, FrameSequence>,
    kind: FrameKind,
    default_frame_duration: f32,
}

impl StateRegistry {
    pub fn new(kind: FrameKind) -> Self {
        Self {
            states: FxHashMap::default(),
            kind,
            default_frame_duration: DEFAULT_FRAME_DURATION,
        }
    }

    pub fn with_default_duration(mut self, frame_duration: f32) -> Self {
        self.default_frame_duration = frame_duration;
        self
    }

    /// Store `frames` under `name`, replacing any previous sequence.
    ///
    /// Fails without touching the registry when `frames` is empty or holds a
    /// frame of a different kind than the registry. A non-positive
    /// `frame_duration` is accepted but makes every tick advance a frame.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        frame_duration: f32,
        play_mode: PlayMode,
        frames: Vec<FrameRef>,
    ) -> Result<(), SpriteError> {
        let name = name.into();
        let sequence = FrameSequence::new(frames, frame_duration, play_mode)
            .ok_or_else(|| SpriteError::EmptySequence(name.clone()))?;
        if let Some(found) = sequence.mismatched_kind(self.kind) {
            return Err(SpriteError::FrameKindMismatch {
                state: name,
                expected: self.kind,
                found,
            });
        }
        if frame_duration <= 0.0 {
            warn!(
                "State '{}' has non-positive frame duration {}; it advances every tick",
                name, frame_duration
            );
        }
        self.states.insert(name, sequence);
        Ok(())
    }

    /// Register with the default frame duration and [`PlayMode::Loop`].
    pub fn register_default(
        &mut self,
        name: impl Into<String>,
        frames: Vec<FrameRef>,
    ) -> Result<(), SpriteError> {
        self.register(name, self.default_frame_duration, PlayMode::Loop, frames)
    }

    pub fn lookup(&self, name: &str) -> Result<&FrameSequence, SpriteError> {
        self.states
            .get(name)
            .ok_or_else(|| SpriteError::UnknownState(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Registered state names, sorted for stable diagnostics.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn default_frame_duration(&self) -> f32 {
        self.default_frame_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(n: i32) -> Vec<FrameRef> {
        (0..n).map(|i| FrameRef::region(i * 16, 0)).collect()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut reg = StateRegistry::new(FrameKind::Region);
        reg.register("walk", 0.2, PlayMode::PingPong, regions(3)).unwrap();
        assert!(reg.contains("walk"));
        let seq = reg.lookup("walk").unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.frame_duration(), 0.2);
        assert_eq!(seq.play_mode(), PlayMode::PingPong);
    }

    #[test]
    fn test_register_default_uses_loop_and_default_duration() {
        let mut reg = StateRegistry::new(FrameKind::Region).with_default_duration(0.5);
        reg.register_default("idle", regions(2)).unwrap();
        let seq = reg.lookup("idle").unwrap();
        assert_eq!(seq.frame_duration(), 0.5);
        assert_eq!(seq.play_mode(), PlayMode::Loop);
    }

    #[test]
    fn test_default_duration_is_a_tenth_of_a_second() {
        let reg = StateRegistry::new(FrameKind::Texture);
        assert_eq!(reg.default_frame_duration(), DEFAULT_FRAME_DURATION);
    }

    #[test]
    fn test_reregister_overwrites() {
        let mut reg = StateRegistry::new(FrameKind::Region);
        reg.register_default("walk", regions(4)).unwrap();
        reg.register("walk", 0.3, PlayMode::Loop, regions(2)).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("walk").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_sequence_fails_and_leaves_registry_untouched() {
        let mut reg = StateRegistry::new(FrameKind::Region);
        reg.register_default("walk", regions(2)).unwrap();
        let err = reg.register_default("walk", Vec::new()).unwrap_err();
        assert_eq!(err, SpriteError::EmptySequence("walk".to_string()));
        assert_eq!(reg.lookup("walk").unwrap().len(), 2);

        let err = reg.register_default("jump", Vec::new()).unwrap_err();
        assert_eq!(err, SpriteError::EmptySequence("jump".to_string()));
        assert!(!reg.contains("jump"));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut reg = StateRegistry::new(FrameKind::Texture);
        let err = reg.register_default("walk", regions(1)).unwrap_err();
        assert_eq!(
            err,
            SpriteError::FrameKindMismatch {
                state: "walk".to_string(),
                expected: FrameKind::Texture,
                found: FrameKind::Region,
            }
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn test_non_positive_duration_accepted() {
        let mut reg = StateRegistry::new(FrameKind::Region);
        assert!(reg.register("fast", 0.0, PlayMode::Loop, regions(2)).is_ok());
        assert!(reg.register("faster", -1.0, PlayMode::Loop, regions(2)).is_ok());
    }

    #[test]
    fn test_lookup_unknown() {
        let reg = StateRegistry::new(FrameKind::Region);
        assert_eq!(
            reg.lookup("missing").unwrap_err(),
            SpriteError::UnknownState("missing".to_string())
        );
        assert!(!reg.contains("missing"));
    }

    #[test]
    fn test_names_sorted() {
        let mut reg = StateRegistry::new(FrameKind::Region);
        reg.register_default("walk", regions(1)).unwrap();
        reg.register_default("idle", regions(1)).unwrap();
        reg.register_default("jump", regions(1)).unwrap();
        assert_eq!(reg.names(), vec!["idle", "jump", "walk"]);
    }
}
