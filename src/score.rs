//! # Notation Documents
//!
//! A notation document is a PLAY string optionally preceded by a YAML
//! frontmatter block that sets the initial playback defaults:
//!
//! ```text
//! ---
//! title: Fifth
//! tempo: 180
//! octave: 2
//! length: 8
//! articulation: legato
//! octave-tracking: false
//! ---
//! P2 P8 GGG L2 E-
//! ```
//!
//! Every key is optional. Anything not given keeps the decoder default.
//! Documents without a leading `---` line are taken as a bare body.
//!
//! ## Example
//! ```rust
//! use tune::parse_score;
//!
//! let score = parse_score("---\ntempo: 60\n---\nC D E\n").unwrap();
//! let mut ctx = score.context();
//!
//! assert_eq!(ctx.whole_note_seconds(), 4.0);
//! assert_eq!(ctx.events().count(), 3);
//! ```

use serde::Deserialize;

use crate::context::{whole_note_seconds, Articulation, PlaybackContext};
use crate::error::NotationError;
use crate::pitch::OCTAVE_MAX;

const FRONTMATTER_MARKER: &str = "---";

/// Raw frontmatter for YAML deserialization
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlaybackDefaults {
    pub title: Option<String>,
    pub tempo: Option<u32>,
    pub octave: Option<u8>,
    pub length: Option<u32>,
    pub articulation: Option<Articulation>,
    pub octave_tracking: Option<bool>,
}

impl PlaybackDefaults {
    /// Parses and validates a YAML frontmatter block (without the `---` lines).
    pub fn from_yaml(content: &str) -> Result<Self, NotationError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let defaults: PlaybackDefaults = serde_yaml::from_str(content)
            .map_err(|e| NotationError::MetadataError(e.to_string()))?;
        defaults.validate()?;
        Ok(defaults)
    }

    fn validate(&self) -> Result<(), NotationError> {
        if self.tempo == Some(0) {
            return Err(NotationError::MetadataError(
                "tempo must be positive".to_string(),
            ));
        }
        if self.length == Some(0) {
            return Err(NotationError::MetadataError(
                "length must be positive".to_string(),
            ));
        }
        if let Some(octave) = self.octave {
            if octave > OCTAVE_MAX {
                return Err(NotationError::MetadataError(format!(
                    "octave {} is out of range 0..={}",
                    octave, OCTAVE_MAX
                )));
            }
        }
        Ok(())
    }

    /// Overrides the settings of `context` with the values present here.
    pub fn apply(&self, context: &mut PlaybackContext) {
        let state = &mut context.state;
        if let Some(tempo) = self.tempo {
            state.whole_note_seconds = whole_note_seconds(tempo);
        }
        if let Some(octave) = self.octave {
            state.octave = octave;
        }
        if let Some(length) = self.length {
            state.duration_multiplier = 1.0 / length as f64;
        }
        if let Some(articulation) = self.articulation {
            state.articulation = articulation;
        }
        if let Some(tracking) = self.octave_tracking {
            state.octave_tracking = tracking;
            if !tracking {
                state.octave_override = false;
            }
        }
    }
}

/// A parsed notation document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    pub defaults: PlaybackDefaults,
    pub body: String,
}

impl Score {
    pub fn title(&self) -> Option<&str> {
        self.defaults.title.as_deref()
    }

    /// A context with the document's defaults applied and its body installed.
    pub fn context(&self) -> PlaybackContext {
        let mut context = PlaybackContext::new();
        self.defaults.apply(&mut context);
        context.set_input(self.body.clone());
        context
    }
}

/// Splits a notation document into its frontmatter defaults and body.
///
/// # Errors
/// Returns [`NotationError::MetadataError`] for an unterminated frontmatter
/// block, malformed YAML, unknown keys or out-of-range values.
pub fn parse_score(source: &str) -> Result<Score, NotationError> {
    let Some(rest) = strip_marker_line(source.trim_start()) else {
        return Ok(Score {
            defaults: PlaybackDefaults::default(),
            body: source.to_string(),
        });
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_MARKER {
            let defaults = PlaybackDefaults::from_yaml(&rest[..offset])?;
            let body = rest[offset + line.len()..].to_string();
            return Ok(Score { defaults, body });
        }
        offset += line.len();
    }

    Err(NotationError::MetadataError(
        "frontmatter is missing its closing ---".to_string(),
    ))
}

/// Returns the text after a leading `---` line, if the source starts with one.
fn strip_marker_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FRONTMATTER_MARKER)?;
    let (line, rest) = match rest.find('\n') {
        Some(end) => (&rest[..end], &rest[end + 1..]),
        None => (rest, ""),
    };
    line.trim().is_empty().then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_body() {
        let score = parse_score("T120 CDE").unwrap();
        assert_eq!(score.defaults, PlaybackDefaults::default());
        assert_eq!(score.body, "T120 CDE");
        assert_eq!(score.title(), None);
    }

    #[test]
    fn test_full_frontmatter() {
        let source = "---\ntitle: Fifth\ntempo: 180\noctave: 2\nlength: 8\narticulation: legato\noctave-tracking: false\n---\nGGG E-\n";
        let score = parse_score(source).unwrap();
        assert_eq!(score.title(), Some("Fifth"));
        assert_eq!(score.body, "GGG E-\n");

        let ctx = score.context();
        assert_eq!(ctx.whole_note_seconds(), 240.0 / 180.0);
        assert_eq!(ctx.duration_multiplier(), 0.125);
        assert_eq!(ctx.fill_ratio(), 1.0);
        let octave = ctx.octave_state();
        assert_eq!(octave.octave, 2);
        assert!(!octave.tracking_enabled);
        assert!(!octave.overridden);
        assert_eq!(ctx.remaining_input(), "GGG E-\n");
    }

    #[test]
    fn test_empty_frontmatter() {
        let score = parse_score("---\n---\nC").unwrap();
        assert_eq!(score.defaults, PlaybackDefaults::default());
        assert_eq!(score.body, "C");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let result = parse_score("---\ntempo: 100\nC D E");
        assert!(matches!(result, Err(NotationError::MetadataError(_))));
    }

    #[test]
    fn test_invalid_values() {
        for yaml in ["tempo: 0", "length: 0", "octave: 7", "articulation: swing", "volume: 3"] {
            let source = format!("---\n{}\n---\nC", yaml);
            assert!(
                matches!(parse_score(&source), Err(NotationError::MetadataError(_))),
                "{} should be rejected",
                yaml
            );
        }
    }

    #[test]
    fn test_dashes_inside_body_are_not_frontmatter() {
        let score = parse_score("C D E-\n---\n").unwrap();
        assert_eq!(score.body, "C D E-\n---\n");
    }
}
