//! Decoder for PLAY-string music notation (a Music Macro Language dialect).
//!
//! A notation string such as `"T180 O2 L8 GGG L2 E-"` is decoded one note at a
//! time into [`ToneEvent`]s: a frequency, how long it sounds, and how long the
//! silence after it lasts. That is all a simple tone generator needs.
//!
//! ```rust
//! use tune::PlaybackContext;
//!
//! let mut ctx = PlaybackContext::new();
//! ctx.set_input("T180 O2 L8 GGG L2 E-");
//!
//! while let Ok(event) = ctx.advance() {
//!     if event.is_end() {
//!         break;
//!     }
//!     // drive the speaker with event.frequency_hz for event.tone_seconds,
//!     // then stay silent for event.rest_seconds
//! }
//! ```

pub mod context;
pub mod driver;
pub mod error;
pub mod event;
mod interpreter;
pub mod pitch;
mod scanner;
pub mod score;

pub use context::{Articulation, OctaveState, PlaybackContext};
pub use driver::{decode, Events};
pub use error::NotationError;
pub use event::ToneEvent;
pub use pitch::{frequency_of, Pitch, OCTAVE_MAX, PITCH_MAX};
pub use score::{parse_score, PlaybackDefaults, Score};

/// Decodes a notation document, honouring its frontmatter defaults.
///
/// # Example
/// ```
/// let events = tune::decode_score("---\nlength: 8\n---\nC D").unwrap();
///
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].slot_seconds(), 0.25);
/// ```
pub fn decode_score(source: &str) -> Result<Vec<ToneEvent>, NotationError> {
    let score = parse_score(source)?;
    score.context().events().collect()
}
