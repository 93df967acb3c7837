//! # Playback Context
//!
//! The mutable state carried from one decode step to the next: the installed
//! notation text and cursor, plus the numeric playback settings that directives
//! change and notes consult.
//!
//! One context drives exactly one voice. Two melodies played together need two
//! contexts; nothing is shared between them.
//!
//! ## Defaults
//! A fresh context is in octave 4 at tempo 120 (a whole note lasts 2 seconds),
//! plays quarter notes with normal articulation (7/8 of each slot sounds),
//! has no previous pitch, and has octave tracking enabled but overridden for
//! the first note.

use serde::{Deserialize, Serialize};

use crate::pitch::Pitch;

pub const DEFAULT_OCTAVE: u8 = 4;
pub const DEFAULT_TEMPO: u32 = 120;
pub const DEFAULT_LENGTH: u32 = 4;

/// Duration of a whole note, in seconds, at `tempo` quarter-note beats per minute.
pub fn whole_note_seconds(tempo: u32) -> f64 {
    240.0 / tempo as f64
}

/// Articulation style, selected with `MS`, `MN` and `ML`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Articulation {
    Staccato,
    #[default]
    Normal,
    Legato,
}

impl Articulation {
    /// Fraction of a note's slot rendered as tone.
    pub fn fill_ratio(self) -> f64 {
        match self {
            Articulation::Staccato => 6.0 / 8.0,
            Articulation::Normal => 7.0 / 8.0,
            Articulation::Legato => 1.0,
        }
    }
}

/// Snapshot of the octave settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OctaveState {
    pub octave: u8,
    pub tracking_enabled: bool,
    pub overridden: bool,
}

/// Numeric playback settings, everything in the context except the text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlaybackState {
    pub(crate) octave: u8,
    pub(crate) whole_note_seconds: f64,
    pub(crate) duration_multiplier: f64,
    pub(crate) articulation: Articulation,
    pub(crate) last_pitch: Option<Pitch>,
    pub(crate) octave_tracking: bool,
    pub(crate) octave_override: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            octave: DEFAULT_OCTAVE,
            whole_note_seconds: whole_note_seconds(DEFAULT_TEMPO),
            duration_multiplier: 1.0 / DEFAULT_LENGTH as f64,
            articulation: Articulation::Normal,
            last_pitch: None,
            octave_tracking: true,
            octave_override: true,
        }
    }
}

/// Decoder state for one voice.
///
/// # Example
/// ```
/// use tune::PlaybackContext;
///
/// let mut ctx = PlaybackContext::new();
/// ctx.set_input("T60 L8 C");
/// let event = ctx.advance().unwrap();
///
/// assert_eq!(ctx.whole_note_seconds(), 4.0);
/// assert_eq!(event.tone_seconds + event.rest_seconds, 0.5);
/// assert!(ctx.is_exhausted());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackContext {
    pub(crate) input: String,
    pub(crate) cursor: usize,
    pub(crate) state: PlaybackState,
}

impl PlaybackContext {
    /// A context with default settings and no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field, including the installed input, to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Installs `text` as the notation to decode, starting from its beginning.
    ///
    /// Playback settings are kept, so a voice can be fed in several chunks.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = 0;
    }

    /// The part of the input not yet consumed.
    pub fn remaining_input(&self) -> &str {
        &self.input[self.cursor..]
    }

    /// Byte offset of the cursor into the installed input.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.input.len()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.state.articulation.fill_ratio()
    }

    pub fn articulation(&self) -> Articulation {
        self.state.articulation
    }

    pub fn octave_state(&self) -> OctaveState {
        OctaveState {
            octave: self.state.octave,
            tracking_enabled: self.state.octave_tracking,
            overridden: self.state.octave_override,
        }
    }

    pub fn whole_note_seconds(&self) -> f64 {
        self.state.whole_note_seconds
    }

    /// Fraction of a whole note used by notes without an explicit length.
    pub fn duration_multiplier(&self) -> f64 {
        self.state.duration_multiplier
    }

    /// The most recently sounded pitch, if any note has sounded yet.
    pub fn last_pitch(&self) -> Option<Pitch> {
        self.state.last_pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = PlaybackContext::new();
        assert_eq!(ctx.whole_note_seconds(), 2.0);
        assert_eq!(ctx.duration_multiplier(), 0.25);
        assert_eq!(ctx.fill_ratio(), 0.875);
        assert_eq!(ctx.last_pitch(), None);
        assert_eq!(
            ctx.octave_state(),
            OctaveState {
                octave: 4,
                tracking_enabled: true,
                overridden: true,
            }
        );
        assert!(ctx.is_exhausted());
        assert_eq!(ctx.remaining_input(), "");
    }

    #[test]
    fn test_articulation_fill() {
        assert_eq!(Articulation::Staccato.fill_ratio(), 0.75);
        assert_eq!(Articulation::Normal.fill_ratio(), 0.875);
        assert_eq!(Articulation::Legato.fill_ratio(), 1.0);
    }

    #[test]
    fn test_set_input_keeps_settings() {
        let mut ctx = PlaybackContext::new();
        ctx.state.octave = 2;
        ctx.state.articulation = Articulation::Legato;
        ctx.set_input("CDE");
        assert_eq!(ctx.position(), 0);
        assert_eq!(ctx.remaining_input(), "CDE");
        assert_eq!(ctx.octave_state().octave, 2);
        assert_eq!(ctx.fill_ratio(), 1.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut ctx = PlaybackContext::new();
        ctx.set_input("CDE");
        ctx.state.whole_note_seconds = 1.0;
        ctx.state.octave_tracking = false;
        ctx.reset();
        assert_eq!(ctx, PlaybackContext::new());
    }

    #[test]
    fn test_tempo_conversion() {
        assert_eq!(whole_note_seconds(120), 2.0);
        assert_eq!(whole_note_seconds(60), 4.0);
        assert_eq!(whole_note_seconds(240), 1.0);
    }
}
