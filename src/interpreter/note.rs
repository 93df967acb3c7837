//! Note and rest interpretation
//!
//! Consumes exactly one note or rest token, with its trailing length, sustain
//! dots and slur mark, and turns it into a [`ToneEvent`].
//!
//! ## Octave Tracking
//! Letter notes may jump to the neighbouring octave so that consecutive notes
//! stay within a tritone of each other. With the previous sounded pitch `p` and
//! the letter's pitch `r` in the current octave:
//! - `r >= p + 6`: the note is played an octave lower
//! - `r < p - 6`: the note is played an octave higher
//! - otherwise it stays where it is
//!
//! The octave the note lands in becomes the context octave. Tracking is skipped
//! for the first note after an explicit `O<n>`, for `N<n>` notes and while
//! tracking is off (`ON`).

use tracing::{debug, trace};

use crate::context::PlaybackState;
use crate::error::NotationError;
use crate::event::ToneEvent;
use crate::pitch::{Pitch, OCTAVE_MAX, PITCH_MAX, SEMITONES};
use crate::scanner::Scanner;

/// Semitone offset of each letter from C, indexed from `a`.
const LETTER_SEMITONES: [i32; 7] = [9, 11, 0, 2, 4, 5, 7];

/// The pitch part of a note token, before range validation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Sound {
    Rest,
    /// `A`..`G`, already placed in an octave. The octave may be out of range
    /// until the pitch has been validated.
    Letter { pitch: i64, octave: i64 },
    /// `N<n>`
    Absolute(i64),
}

/// Interprets the note or rest at byte offset `start` of `text`.
///
/// Returns the event and the offset just past the token. At the end of the
/// text the terminal event is returned with the offset of the end. On failure
/// the state is untouched and the error carries the offset of the token.
pub(crate) fn interpret_note(
    state: &mut PlaybackState,
    text: &str,
    start: usize,
) -> Result<(ToneEvent, usize), NotationError> {
    let mut scanner = Scanner::new(text, start);
    scanner.skip_whitespace();
    let position = scanner.position();

    if scanner.is_at_end() {
        return Ok((ToneEvent::END, position));
    }

    let sound = parse_sound(state, &mut scanner).ok_or_else(|| {
        debug!(position, "unrecognized note token");
        NotationError::invalid(position, "expected a note, N<pitch> or a rest")
    })?;

    let sound = resolve_octave(state, sound);

    let pitch = match sound {
        Sound::Rest => None,
        Sound::Letter { pitch, .. } | Sound::Absolute(pitch) => {
            let resolved = Pitch::new(pitch).ok_or_else(|| {
                debug!(position, pitch, "pitch out of range");
                NotationError::invalid(
                    position,
                    format!("pitch {} is out of range 0..={}", pitch, PITCH_MAX),
                )
            })?;
            Some(resolved)
        }
    };

    let mut multiplier = state.duration_multiplier;
    if !matches!(sound, Sound::Absolute(_)) {
        if let Some(divisor) = scanner.number() {
            if divisor == 0 {
                debug!(position, "zero note length");
                return Err(NotationError::invalid(
                    position,
                    "note length divisor must be positive",
                ));
            }
            multiplier = 1.0 / divisor as f64;
        }
    }

    while scanner.eat('.') {
        multiplier *= 1.5;
    }

    let fill = if scanner.eat('_') {
        1.0
    } else {
        state.articulation.fill_ratio()
    };

    // Nothing below can fail; commit.
    if let Sound::Letter { octave, .. } = sound {
        if tracking_active(state) {
            state.octave = octave.clamp(0, OCTAVE_MAX as i64) as u8;
        }
    }
    state.octave_override = false;
    if pitch.is_some() {
        state.last_pitch = pitch;
    }

    let slot = state.whole_note_seconds * multiplier;
    let event = match pitch {
        None => ToneEvent::rest(slot),
        Some(pitch) => ToneEvent::tone(pitch.frequency(), slot, fill),
    };

    trace!(
        position,
        pitch = pitch.map(Pitch::index),
        octave = state.octave,
        "note"
    );
    Ok((event, scanner.position()))
}

/// Reads the note letter, absolute pitch or rest mark, with any accidental.
fn parse_sound(state: &PlaybackState, scanner: &mut Scanner) -> Option<Sound> {
    let sound = match scanner.peek()? {
        'p' | '~' => {
            scanner.advance();
            Sound::Rest
        }
        'n' => {
            scanner.advance();
            Sound::Absolute(scanner.number()? as i64)
        }
        c @ 'a'..='g' => {
            scanner.advance();
            let octave = state.octave as i64;
            let mut pitch =
                LETTER_SEMITONES[(c as u8 - b'a') as usize] as i64 + SEMITONES as i64 * octave;
            if scanner.eat('#') || scanner.eat('+') {
                pitch += 1;
            } else if scanner.eat('-') {
                pitch -= 1;
            }
            Sound::Letter { pitch, octave }
        }
        _ => return None,
    };
    Some(sound)
}

fn tracking_active(state: &PlaybackState) -> bool {
    state.octave_tracking && !state.octave_override
}

/// Moves a letter note into the octave nearest the last sounded pitch.
fn resolve_octave(state: &PlaybackState, sound: Sound) -> Sound {
    let Sound::Letter { pitch, octave } = sound else {
        return sound;
    };
    let Some(last) = state.last_pitch else {
        return sound;
    };
    if !tracking_active(state) {
        return sound;
    }

    let last = last.index() as i64;
    let leap = (SEMITONES / 2) as i64;
    let semitones = SEMITONES as i64;
    if pitch >= last + leap {
        Sound::Letter {
            pitch: pitch - semitones,
            octave: octave - 1,
        }
    } else if pitch < last - leap {
        Sound::Letter {
            pitch: pitch + semitones,
            octave: octave + 1,
        }
    } else {
        sound
    }
}
