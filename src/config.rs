//! # Engine Configuration
//!
//! Tuning knobs for classification and composition, loadable from YAML:
//!
//! ```yaml
//! classifier:
//!   long-line-words: 3
//!   chord-ratio: 0.7
//! merge-text: true
//! parallel-threshold: 256
//! vocabulary: chords.yaml
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above (no vocabulary).

use crate::error::{ChordsheetError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Thresholds for [`LineClassifier`](crate::LineClassifier)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Lines with more words than this are lyrics as soon as one word is not a chord
    pub long_line_words: usize,
    /// Minimum share of chord words for a short mixed line to count as chords
    pub chord_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            long_line_words: 3,
            chord_ratio: 0.7,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    /// Merge adjacent text segments within a line
    pub merge_text: bool,
    /// Line count at which lines are rendered in parallel; 0 disables
    pub parallel_threshold: usize,
    /// Default vocabulary file
    pub vocabulary: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            merge_text: true,
            parallel_threshold: 256,
            vocabulary: None,
        }
    }
}

/// Raw classifier section for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawClassifierConfig {
    long_line_words: Option<usize>,
    chord_ratio: Option<f64>,
}

/// Raw config document for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawEngineConfig {
    classifier: Option<RawClassifierConfig>,
    merge_text: Option<bool>,
    parallel_threshold: Option<usize>,
    vocabulary: Option<PathBuf>,
}

impl EngineConfig {
    /// Parse a YAML config document.
    ///
    /// Relative `vocabulary` paths are kept as written.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawEngineConfig = serde_yaml::from_str(content)
            .map_err(|e| ChordsheetError::ConfigError(e.to_string()))?;

        let defaults = Self::default();
        let raw_classifier = raw.classifier.unwrap_or_default();
        let classifier = ClassifierConfig {
            long_line_words: raw_classifier
                .long_line_words
                .unwrap_or(defaults.classifier.long_line_words),
            chord_ratio: raw_classifier
                .chord_ratio
                .unwrap_or(defaults.classifier.chord_ratio),
        };

        let config = Self {
            classifier,
            merge_text: raw.merge_text.unwrap_or(defaults.merge_text),
            parallel_threshold: raw.parallel_threshold.unwrap_or(defaults.parallel_threshold),
            vocabulary: raw.vocabulary,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config file.
    ///
    /// A relative `vocabulary` path is resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ChordsheetError::io(e, path))?;
        let mut config = Self::from_yaml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.vocabulary = config.vocabulary.take().map(|vocab| {
                if vocab.is_relative() {
                    dir.join(vocab)
                } else {
                    vocab
                }
            });
        }
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let ratio = self.classifier.chord_ratio;
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(ChordsheetError::ConfigError(format!(
                "chord-ratio must be between 0 and 1, got {}",
                ratio
            )));
        }
        Ok(())
    }
}
