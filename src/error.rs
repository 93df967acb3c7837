//! # Error Types
//!
//! This module defines the error type returned by the notation decoder.
//!
//! The interpreter itself only ever raises `InvalidNotation`, carrying the byte offset
//! of the offending token so callers can point at it (or resume past it themselves).
//! `MetadataError` is reserved for the optional YAML frontmatter of a notation document.
//!
//! ## Usage
//! ```rust
//! use tune::{decode, NotationError};
//!
//! match decode("T120 O7 C") {
//!     Ok(events) => println!("{} events", events.len()),
//!     Err(NotationError::InvalidNotation { position, message }) => {
//!         eprintln!("Bad token at offset {}: {}", position, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    /// A directive or note token could not be interpreted.
    ///
    /// Raised for unrecognized or malformed directives, out-of-range octaves,
    /// zero tempo or duration divisors, unknown note tokens and pitches that
    /// fall outside the pitch table.
    ///
    /// # Example
    /// ```
    /// # use tune::NotationError;
    /// let err = NotationError::InvalidNotation {
    ///     position: 5,
    ///     message: "octave 7 is out of range 0..=6".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid notation at offset 5: octave 7 is out of range 0..=6");
    /// ```
    #[error("Invalid notation at offset {position}: {message}")]
    InvalidNotation { position: usize, message: String },

    /// Invalid frontmatter in a notation document.
    ///
    /// # Example
    /// ```
    /// # use tune::NotationError;
    /// let err = NotationError::MetadataError("tempo must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: tempo must be positive");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
}

impl NotationError {
    pub(crate) fn invalid(position: usize, message: impl Into<String>) -> Self {
        NotationError::InvalidNotation {
            position,
            message: message.into(),
        }
    }

    /// Byte offset of the offending token, if this error came from the interpreter.
    pub fn position(&self) -> Option<usize> {
        match self {
            NotationError::InvalidNotation { position, .. } => Some(*position),
            NotationError::MetadataError(_) => None,
        }
    }
}
