//! Error types for sprite animation.

use thiserror::Error;

use crate::components::framesequence::FrameKind;

/// Contract violations reported by the animation core.
///
/// None of these are fatal: the sprite is left exactly as it was before the
/// failing call, and the caller decides whether to log, ignore or escalate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// `set_state` or `lookup` was given a name that was never registered.
    #[error("state '{0}' does not exist")]
    UnknownState(String),
    /// A state was registered with no frames.
    #[error("state '{0}' has no frames")]
    EmptySequence(String),
    /// `tick` was called before any state was selected.
    #[error("no active state; call set_state first")]
    NoActiveState,
    /// A state was registered with frames of a different kind than the sprite uses.
    #[error("state '{state}' has {found:?} frames but the sprite uses {expected:?} frames")]
    FrameKindMismatch {
        state: String,
        expected: FrameKind,
        found: FrameKind,
    },
}
