//! Playback cursor and the frame-advance state machine.
//!
//! The cursor starts with no active state. [`PlaybackCursor::set_state`]
//! selects a registered state and rewinds to its first frame, unless that
//! state is already active, in which case playback continues untouched.
//!
//! # Advance rules
//!
//! Each call to [`PlaybackCursor::advance`] adds the elapsed time to the frame
//! timer. Once the timer reaches the state's frame duration the cursor takes a
//! single step and the timer restarts from zero; any overshoot is dropped.
//!
//! - `Loop`: `0, 1, .., N-1, 0, 1, ..`
//! - `PingPong`: `0, 1, .., N-1, N-2, .., 1, 0, 1, ..` (ends are never shown twice in a row)
//!
//! A single-frame sequence always shows frame 0 in either mode.

use crate::components::framesequence::{FrameRef, FrameSequence, PlayMode};
use crate::components::stateregistry::StateRegistry;
use crate::error::SpriteError;

/// Travel direction, only meaningful for [`PlayMode::PingPong`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Mutable playback position of one sprite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackCursor {
    active_state: Option<String>,
    // Signed so that backward steps can go below zero before correction.
    frame_index: i32,
    frame_timer: f32,
    direction: Direction,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_state(&self) -> Option<&str> {
        self.active_state.as_deref()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index.max(0) as usize
    }

    pub fn frame_timer(&self) -> f32 {
        self.frame_timer
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Select `name` as the active state.
    ///
    /// Unknown names fail without touching the cursor. Selecting the state
    /// that is already active is a no-op.
    pub fn set_state(&mut self, registry: &StateRegistry, name: &str) -> Result<(), SpriteError> {
        if !registry.contains(name) {
            return Err(SpriteError::UnknownState(name.to_string()));
        }
        if self.active_state.as_deref() == Some(name) {
            return Ok(());
        }
        self.active_state = Some(name.to_string());
        self.rewind();
        Ok(())
    }

    /// Go back to the first frame of the active state.
    pub fn rewind(&mut self) {
        self.frame_index = 0;
        self.frame_timer = 0.0;
        self.direction = Direction::Forward;
    }

    /// Advance by `elapsed` seconds and return the frame to display.
    ///
    /// Fails with [`SpriteError::NoActiveState`] before the first
    /// `set_state`, leaving the cursor untouched. Negative `elapsed` counts
    /// as zero.
    pub fn advance<'a>(
        &mut self,
        registry: &'a StateRegistry,
        elapsed: f32,
    ) -> Result<&'a FrameRef, SpriteError> {
        let sequence = self.active_sequence(registry)?;
        if self.frame_index() >= sequence.len() {
            // The active state was replaced by a shorter sequence.
            self.rewind();
        }

        self.frame_timer += elapsed.max(0.0);
        if self.frame_timer >= sequence.frame_duration() {
            self.frame_timer = 0.0;
            self.step(sequence.len(), sequence.play_mode());
        }

        Ok(&sequence.frames()[self.frame_index()])
    }

    /// Frame at the cursor without advancing time.
    pub fn current_frame<'a>(
        &self,
        registry: &'a StateRegistry,
    ) -> Result<&'a FrameRef, SpriteError> {
        let sequence = self.active_sequence(registry)?;
        Ok(sequence.frame(self.frame_index()).unwrap_or(&sequence.frames()[0]))
    }

    fn active_sequence<'a>(
        &self,
        registry: &'a StateRegistry,
    ) -> Result<&'a FrameSequence, SpriteError> {
        match self.active_state.as_deref() {
            Some(name) => registry.lookup(name),
            None => Err(SpriteError::NoActiveState),
        }
    }

    /// Move one frame and correct at the sequence boundaries.
    fn step(&mut self, len: usize, mode: PlayMode) {
        let len = len as i32;
        match (mode, self.direction) {
            (PlayMode::PingPong, Direction::Backward) => self.frame_index -= 1,
            _ => self.frame_index += 1,
        }

        if self.frame_index >= len {
            match mode {
                PlayMode::Loop => self.frame_index = 0,
                PlayMode::PingPong => {
                    self.frame_index = (len - 2).max(0);
                    self.direction = Direction::Backward;
                }
            }
        }

        if mode == PlayMode::PingPong
            && self.direction == Direction::Backward
            && self.frame_index <= 0
        {
            self.frame_index = 0;
            self.direction = Direction::Forward;
        }
    }
}
