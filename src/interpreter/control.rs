//! Control directive interpretation
//!
//! Applies octave, length, tempo and articulation directives until the first
//! token that is not a directive. Each directive is validated as a whole before
//! anything is applied, so a rejected token leaves the state as it was; earlier
//! directives in the same run stay applied.

use tracing::{debug, trace};

use crate::context::{whole_note_seconds, Articulation, PlaybackState};
use crate::error::NotationError;
use crate::pitch::OCTAVE_MAX;
use crate::scanner::Scanner;

/// A fully parsed directive, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive {
    /// `O<n>`: sets the octave and suppresses tracking for the next note.
    Octave(u8),
    /// `<` and `>`.
    OctaveStep(u8),
    TrackingOff,
    TrackingOn,
    Length(u32),
    Tempo(u32),
    Articulation(Articulation),
}

/// Interprets directives in `text` from byte offset `start`.
///
/// Returns the offset of the first token that is not a directive (or the end of
/// the text). On failure the error carries the offset of the rejected directive.
pub(crate) fn interpret_controls(
    state: &mut PlaybackState,
    text: &str,
    start: usize,
) -> Result<usize, NotationError> {
    let mut scanner = Scanner::new(text, start);

    loop {
        scanner.skip_whitespace();
        let position = scanner.position();

        let directive = match parse_directive(state, &mut scanner) {
            Ok(Some(directive)) => directive,
            Ok(None) => return Ok(position),
            Err(message) => {
                debug!(position, %message, "rejected directive");
                return Err(NotationError::invalid(position, message));
            }
        };

        trace!(position, ?directive, "directive");
        apply(state, directive);
    }
}

/// Parses one directive at the cursor, or returns `Ok(None)` without consuming
/// anything if the next token is not a directive.
fn parse_directive(
    state: &PlaybackState,
    scanner: &mut Scanner,
) -> Result<Option<Directive>, String> {
    let directive = match scanner.peek() {
        Some('o') => {
            scanner.advance();
            if let Some(octave) = scanner.number() {
                Directive::Octave(checked_octave(octave as i64)?)
            } else if scanner.eat('n') {
                Directive::TrackingOff
            } else if scanner.eat('l') {
                Directive::TrackingOn
            } else {
                return Err("expected an octave number, N or L after O".to_string());
            }
        }
        Some('<') => {
            scanner.advance();
            Directive::OctaveStep(checked_octave(state.octave as i64 - 1)?)
        }
        Some('>') => {
            scanner.advance();
            Directive::OctaveStep(checked_octave(state.octave as i64 + 1)?)
        }
        Some('l') => {
            scanner.advance();
            match scanner.number() {
                Some(divisor) if divisor > 0 => Directive::Length(divisor),
                _ => return Err("length divisor must be a positive number".to_string()),
            }
        }
        Some('t') => {
            scanner.advance();
            match scanner.number() {
                Some(tempo) if tempo > 0 => Directive::Tempo(tempo),
                _ => return Err("tempo must be a positive number".to_string()),
            }
        }
        Some('m') => {
            scanner.advance();
            let articulation = match scanner.peek() {
                Some('s') => Articulation::Staccato,
                Some('n') => Articulation::Normal,
                Some('l') => Articulation::Legato,
                _ => return Err("expected S, N or L after M".to_string()),
            };
            scanner.advance();
            Directive::Articulation(articulation)
        }
        _ => return Ok(None),
    };
    Ok(Some(directive))
}

fn checked_octave(octave: i64) -> Result<u8, String> {
    if (0..=OCTAVE_MAX as i64).contains(&octave) {
        Ok(octave as u8)
    } else {
        Err(format!("octave {} is out of range 0..={}", octave, OCTAVE_MAX))
    }
}

fn apply(state: &mut PlaybackState, directive: Directive) {
    match directive {
        Directive::Octave(octave) => {
            state.octave = octave;
            state.octave_override = true;
        }
        Directive::OctaveStep(octave) => state.octave = octave,
        Directive::TrackingOff => {
            state.octave_tracking = false;
            state.octave_override = false;
        }
        Directive::TrackingOn => state.octave_tracking = true,
        Directive::Length(divisor) => state.duration_multiplier = 1.0 / divisor as f64,
        Directive::Tempo(tempo) => state.whole_note_seconds = whole_note_seconds(tempo),
        Directive::Articulation(articulation) => state.articulation = articulation,
    }
}
