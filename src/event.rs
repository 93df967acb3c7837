//! Tone event type definitions
//!
//! A tone event is what one decode step hands to the sound generator: play
//! `frequency_hz` for `tone_seconds`, then stay silent for `rest_seconds`.

use serde::Serialize;

/// One decoded note or rest.
///
/// # Fields
/// - `frequency_hz`: Tone frequency, `0.0` for rests
/// - `tone_seconds`: How long the tone sounds, `0.0` for rests
/// - `rest_seconds`: Silence after the tone (the whole slot for rests)
///
/// An event with all three fields zero marks the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneEvent {
    pub frequency_hz: f64,
    pub tone_seconds: f64,
    pub rest_seconds: f64,
}

impl ToneEvent {
    /// The terminal event returned once the input is exhausted.
    pub const END: ToneEvent = ToneEvent {
        frequency_hz: 0.0,
        tone_seconds: 0.0,
        rest_seconds: 0.0,
    };

    pub(crate) fn rest(slot_seconds: f64) -> Self {
        ToneEvent {
            frequency_hz: 0.0,
            tone_seconds: 0.0,
            rest_seconds: slot_seconds,
        }
    }

    pub(crate) fn tone(frequency_hz: f64, slot_seconds: f64, fill: f64) -> Self {
        ToneEvent {
            frequency_hz,
            tone_seconds: slot_seconds * fill,
            rest_seconds: slot_seconds * (1.0 - fill),
        }
    }

    pub fn is_end(&self) -> bool {
        self.frequency_hz == 0.0 && self.tone_seconds == 0.0 && self.rest_seconds == 0.0
    }

    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0.0 && !self.is_end()
    }

    /// Total time taken by this event (tone plus trailing rest).
    pub fn slot_seconds(&self) -> f64 {
        self.tone_seconds + self.rest_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_event() {
        assert!(ToneEvent::END.is_end());
        assert!(!ToneEvent::END.is_rest());
        assert_eq!(ToneEvent::END.slot_seconds(), 0.0);
    }

    #[test]
    fn test_tone_split() {
        let event = ToneEvent::tone(440.0, 0.5, 0.75);
        assert_eq!(event.tone_seconds, 0.375);
        assert_eq!(event.rest_seconds, 0.125);
        assert_eq!(event.slot_seconds(), 0.5);
        assert!(!event.is_rest());
    }

    #[test]
    fn test_rest_event() {
        let event = ToneEvent::rest(0.5);
        assert!(event.is_rest());
        assert_eq!(event.tone_seconds, 0.0);
        assert_eq!(event.rest_seconds, 0.5);
    }

    #[test]
    fn test_serializes_camel_case() {
        let yaml = serde_yaml::to_string(&ToneEvent::tone(440.0, 1.0, 1.0)).unwrap();
        assert!(yaml.contains("frequencyHz: 440.0"));
        assert!(yaml.contains("toneSeconds: 1.0"));
        assert!(yaml.contains("restSeconds: 0.0"));
    }
}
