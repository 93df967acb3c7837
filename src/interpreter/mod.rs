//! # Interpreter Module
//!
//! The two stages of a decode step.
//!
//! ## Sub-modules
//! - `control` - Directives: `O<n>`, `ON`, `OL`, `<`, `>`, `L<n>`, `T<n>`, `MS`, `MN`, `ML`
//! - `note` - One note (`A`..`G` with `#`/`+`/`-`, `N<n>`) or rest (`P`, `~`),
//!   followed by an optional length, sustain dots (`.`) and a slur mark (`_`)
//!
//! Both stages read the input through the shared `Scanner`, skip whitespace
//! between tokens, and report failures as `NotationError::InvalidNotation` at the
//! offset of the offending token.
//!
//! ## Related Modules
//! - `driver` - Runs `control` then `note` once per step
//! - `context` - The state both stages read and update

mod control;
mod note;


pub(crate) use control::interpret_controls;
pub(crate) use note::interpret_note;
