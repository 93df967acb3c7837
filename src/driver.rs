//! # Step Driver
//!
//! The public entry point of the decoder: each call to
//! [`PlaybackContext::advance`] applies the directives at the cursor, then
//! decodes exactly one note or rest and returns its [`ToneEvent`].
//!
//! ## Completion
//! Once the input is used up, `advance` returns [`ToneEvent::END`] (all fields
//! zero) on every call. This is how callers detect the end of a voice; it is
//! not an error.
//!
//! ## Failures
//! A failing step returns the error and leaves the cursor on the offending
//! token. Directives applied earlier in the same step stay applied. Calling
//! `advance` again fails the same way, so callers normally stop decoding the
//! voice.
//!
//! ## Example
//! ```rust
//! use tune::PlaybackContext;
//!
//! let mut ctx = PlaybackContext::new();
//! ctx.set_input("MS C P8");
//!
//! let note = ctx.advance().unwrap();
//! assert_eq!(note.tone_seconds, 0.375);
//!
//! let rest = ctx.advance().unwrap();
//! assert_eq!(rest.frequency_hz, 0.0);
//! assert_eq!(rest.rest_seconds, 0.25);
//!
//! assert!(ctx.advance().unwrap().is_end());
//! ```

use std::iter::FusedIterator;

use crate::context::PlaybackContext;
use crate::error::NotationError;
use crate::event::ToneEvent;
use crate::interpreter::{interpret_controls, interpret_note};

impl PlaybackContext {
    /// Decodes the next note or rest.
    ///
    /// # Errors
    /// Returns [`NotationError::InvalidNotation`] if a directive or the note is
    /// invalid; the cursor is left at the offending token.
    pub fn advance(&mut self) -> Result<ToneEvent, NotationError> {
        let after_controls = match interpret_controls(&mut self.state, &self.input, self.cursor) {
            Ok(position) => position,
            Err(err) => {
                if let Some(position) = err.position() {
                    self.cursor = position;
                }
                return Err(err);
            }
        };
        self.cursor = after_controls;

        let (event, after_note) = interpret_note(&mut self.state, &self.input, self.cursor)?;
        self.cursor = after_note;
        Ok(event)
    }

    /// Applies the directives at the start of `text` without touching the
    /// installed input.
    ///
    /// Returns the byte offset in `text` where interpretation stopped: the first
    /// token that is not a directive, or the end of `text`. Error positions are
    /// offsets in `text` too.
    ///
    /// # Example
    /// ```
    /// use tune::PlaybackContext;
    ///
    /// let mut ctx = PlaybackContext::new();
    /// let stop = ctx.apply_controls("T60 O2 ML C").unwrap();
    ///
    /// assert_eq!(stop, 10);
    /// assert_eq!(ctx.whole_note_seconds(), 4.0);
    /// assert_eq!(ctx.octave_state().octave, 2);
    /// assert_eq!(ctx.fill_ratio(), 1.0);
    /// ```
    pub fn apply_controls(&mut self, text: &str) -> Result<usize, NotationError> {
        interpret_controls(&mut self.state, text, 0)
    }

    /// Iterates over the remaining events.
    ///
    /// The iterator ends at the end of the input (the terminal event is not
    /// yielded) or after yielding the first error.
    pub fn events(&mut self) -> Events<'_> {
        Events {
            context: self,
            done: false,
        }
    }
}

/// Iterator returned by [`PlaybackContext::events`].
pub struct Events<'a> {
    context: &'a mut PlaybackContext,
    done: bool,
}

impl Iterator for Events<'_> {
    type Item = Result<ToneEvent, NotationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.context.advance() {
            Ok(event) if event.is_end() => {
                self.done = true;
                None
            }
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Events<'_> {}

/// Decodes a whole notation string with a fresh default context.
///
/// # Example
/// ```
/// let events = tune::decode("L8 CDE P4").unwrap();
///
/// assert_eq!(events.len(), 4);
/// assert!(events[3].is_rest());
/// ```
pub fn decode(text: &str) -> Result<Vec<ToneEvent>, NotationError> {
    let mut context = PlaybackContext::new();
    context.set_input(text);
    context.events().collect()
}
