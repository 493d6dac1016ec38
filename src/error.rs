//! # Error Types
//!
//! This module defines all error types for the chord player.
//!
//! None of these errors is fatal: the chord input stays usable after any of them.
//!
//! ## Error Types
//! - [`ChordError`] - Malformed or unrecognized chord text and theory lookup failures
//! - [`StorageError`] - Preference read/write failures (recovered with defaults)
//! - [`PlaybackError`] - Audio output failures (logged, the sequence continues)
//!
//! Keys outside the playable range are not an error: they are dropped from the
//! trigger set when a schedule is built.
//!
//! ## Usage
//! ```rust
//! use chordplay::{parse_chord, ChordError};
//!
//! match parse_chord("Hm7", 4) {
//!     Ok(chord) => println!("keys: {:?}", chord.tones),
//!     Err(ChordError::ParseError { column, message, .. }) => {
//!         eprintln!("Invalid chord at column {}: {}", column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// Chord text does not match the chord grammar.
    ///
    /// `column` is the 1-based character position (after trimming) where
    /// matching stopped.
    ///
    /// # Example
    /// ```
    /// # use chordplay::ChordError;
    /// let err = ChordError::ParseError {
    ///     input: "Cmaj9".to_string(),
    ///     column: 2,
    ///     message: "Unknown chord quality 'maj9'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid chord 'Cmaj9' at column 2: Unknown chord quality 'maj9'");
    /// ```
    #[error("Invalid chord '{input}' at column {column}: {message}")]
    ParseError {
        input: String,
        column: usize,
        message: String,
    },

    /// A root spelling has no pitch class in the theory table.
    #[error("Unknown note spelling '{0}'")]
    UnknownSpelling(String),

    /// A quality suffix has no offset list in the theory table.
    #[error("Unknown chord quality '{0}'")]
    UnknownQuality(String),
}

/// Preference store failures.
///
/// These never reach the user; readers substitute the documented default.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A stored value could not be decoded (or encoded) as a JSON scalar.
    #[error("Invalid value for preference '{key}': {source}")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The host storage backend refused the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Audio output failures, reported per trigger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("Missing sample: {0}")]
    MissingSample(String),

    #[error("Audio backend error: {0}")]
    Backend(String),
}
