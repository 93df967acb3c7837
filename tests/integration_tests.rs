//! Integration tests for the notation decoder
//!
//! Tests the public API from notation text to tone events.

use pretty_assertions::assert_eq;
use tune::{decode, decode_score, frequency_of, NotationError, PlaybackContext, ToneEvent};

#[test]
fn test_decode_melody() {
    let events = decode("T120 O4 L4 C E G P").unwrap();

    let frequencies: Vec<f64> = events.iter().map(|e| e.frequency_hz).collect();
    assert_eq!(
        frequencies,
        vec![
            frequency_of(48).unwrap(),
            frequency_of(52).unwrap(),
            frequency_of(55).unwrap(),
            0.0,
        ]
    );

    let total: f64 = events.iter().map(ToneEvent::slot_seconds).sum();
    assert_eq!(total, 2.0);
}

#[test]
fn test_decode_stops_at_first_error() {
    let result = decode("C D O8 E");
    assert_eq!(
        result,
        Err(NotationError::InvalidNotation {
            position: 4,
            message: "octave 8 is out of range 0..=6".to_string(),
        })
    );
}

#[test]
fn test_events_iterator_is_fused_after_error() {
    let mut ctx = PlaybackContext::new();
    ctx.set_input("C Q D");

    let mut events = ctx.events();
    assert!(matches!(events.next(), Some(Ok(_))));
    assert!(matches!(events.next(), Some(Err(_))));
    assert!(events.next().is_none());
    assert!(events.next().is_none());

    assert_eq!(ctx.remaining_input(), "Q D");
}

#[test]
fn test_feeding_a_voice_in_chunks() {
    let mut ctx = PlaybackContext::new();
    ctx.set_input("T60 MS O3 C");
    let first = ctx.advance().unwrap();
    assert!(ctx.advance().unwrap().is_end());

    // Settings carry over to the next chunk.
    ctx.set_input("C");
    let second = ctx.advance().unwrap();
    assert_eq!(first, second);
    assert_eq!(second.tone_seconds, 1.0 * 0.75);
}

#[test]
fn test_independent_voices() {
    let mut melody = PlaybackContext::new();
    let mut bass = PlaybackContext::new();
    melody.set_input("O5 L8 C D E F");
    bass.set_input("O1 L2 C G");

    let melody_events: Vec<_> = melody.events().collect::<Result<_, _>>().unwrap();
    let bass_events: Vec<_> = bass.events().collect::<Result<_, _>>().unwrap();

    assert_eq!(melody_events.len(), 4);
    assert_eq!(bass_events.len(), 2);
    assert_eq!(melody.octave_state().octave, 5);
    assert_eq!(bass.octave_state().octave, 0);
    assert_eq!(bass.last_pitch().map(|p| p.index()), Some(7));
}

#[test]
fn test_sounded_and_rest_counts() {
    let text = "T150 L8 MS CC P GG ~ AA P4 ML G2";
    let events = decode(text).unwrap();

    let sounded = events.iter().filter(|e| e.frequency_hz > 0.0).count();
    let rests = events
        .iter()
        .filter(|e| e.frequency_hz == 0.0 && e.rest_seconds > 0.0)
        .count();
    assert_eq!(sounded, 7);
    assert_eq!(rests, 3);
    assert!(events.iter().all(|e| !e.is_end()));
}

#[test]
fn test_decode_score_with_frontmatter() {
    let source = r#"---
title: Fifth
tempo: 180
octave: 2
length: 8
---
P2 P8 GGG L2 E-
"#;
    let events = decode_score(source).unwrap();
    assert_eq!(events.len(), 6);

    let g = events[2];
    assert_eq!(g.frequency_hz, frequency_of(31).unwrap());
    assert!((g.slot_seconds() - 240.0 / 180.0 * 0.125).abs() < 1e-12);

    let e_flat = events[5];
    assert_eq!(e_flat.frequency_hz, frequency_of(27).unwrap());
}

#[test]
fn test_decode_score_rejects_bad_frontmatter() {
    let result = decode_score("---\ntempo: fast\n---\nC");
    assert!(matches!(result, Err(NotationError::MetadataError(_))));
}

#[test]
fn test_error_positions_index_the_body() {
    let mut ctx = PlaybackContext::new();
    ctx.set_input("CDE  H");
    for _ in 0..3 {
        ctx.advance().unwrap();
    }
    let err = ctx.advance().unwrap_err();
    assert_eq!(err.position(), Some(5));
    assert_eq!(&"CDE  H"[5..], ctx.remaining_input());
}
