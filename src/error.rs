//! # Error Types
//!
//! This module defines the error type shared by the vocabulary loaders, the configuration layer
//! and the command line front end.
//!
//! Rendering itself never fails: unrecognized chords fall back to plain text and an empty
//! vocabulary only degrades classification. Errors only come from the collaborators that feed
//! the engine (vocabulary files, config files, I/O).
//!
//! ## Error Types
//! - `EmptyVocabulary` - a vocabulary was built from zero usable symbols
//! - `VocabularyError` - a vocabulary source could not be parsed
//! - `ConfigError` - invalid engine configuration
//! - `Io` - file access failed
//!
//! ## Usage
//! ```rust
//! use chordsheet::{ChordVocabulary, ChordsheetError};
//!
//! match ChordVocabulary::new(Vec::<String>::new()) {
//!     Ok(_) => unreachable!(),
//!     Err(ChordsheetError::EmptyVocabulary) => {
//!         // fall back to degraded mode
//!         let _vocab = ChordVocabulary::empty();
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, ChordsheetError>;

#[derive(Error, Debug)]
pub enum ChordsheetError {
    /// The vocabulary contained no usable chord symbols.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordsheetError;
    /// let err = ChordsheetError::EmptyVocabulary;
    /// assert_eq!(err.to_string(), "Chord vocabulary is empty");
    /// ```
    #[error("Chord vocabulary is empty")]
    EmptyVocabulary,

    /// A vocabulary source could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordsheetError;
    /// let err = ChordsheetError::VocabularyError {
    ///     source_name: "chords.yaml".to_string(),
    ///     message: "expected a sequence".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid vocabulary in chords.yaml: expected a sequence");
    /// ```
    #[error("Invalid vocabulary in {source_name}: {message}")]
    VocabularyError { source_name: String, message: String },

    /// Invalid engine configuration.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordsheetError;
    /// let err = ChordsheetError::ConfigError("chord-ratio must be between 0 and 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: chord-ratio must be between 0 and 1");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// I/O failure with the path involved.
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ChordsheetError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a vocabulary parse error for a named source
    pub fn vocabulary(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::VocabularyError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
