//! # Line Classification
//!
//! Decides whether a line of song text is chord notation or sung lyrics.
//!
//! ## Rules
//! Words are whitespace-separated and stripped of surrounding punctuation (`#` is kept so
//! `(C#)` still reads as `C#`). A word counts as a chord if the vocabulary contains it or
//! shares its root. Then, in order:
//! 1. No words → lyric line
//! 2. Every word is a chord → chord line
//! 3. More than `long_line_words` words with any non-chord word → lyric line
//! 4. Otherwise chord line iff `chords / words >= chord_ratio`
//!
//! Short lines get the benefit of the doubt because chord lines are terse (`C   G  Am`).
//! Long mixed lines are prose: English is full of one-letter words like `A` that collide with
//! chord roots.
//!
//! ## Example
//! ```rust
//! use chordsheet::{classify_line, ChordVocabulary, LineKind};
//!
//! let vocab = ChordVocabulary::new(["C", "G", "A"])?;
//! assert_eq!(classify_line("C       G        Am", &vocab), LineKind::Chord);
//! assert_eq!(classify_line("I love the C major feel", &vocab), LineKind::Lyric);
//! # Ok::<(), chordsheet::ChordsheetError>(())
//! ```

use crate::config::ClassifierConfig;
use crate::vocabulary::ChordVocabulary;
use serde::Serialize;
use tracing::trace;

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Chord,
    Lyric,
}

/// Whitespace-separated words of a line with surrounding punctuation stripped.
///
/// Words that strip down to nothing are dropped.
pub fn line_words(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '#'))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Line classifier with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    config: ClassifierConfig,
}

impl LineClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one line against the vocabulary
    pub fn classify(&self, line: &str, vocab: &ChordVocabulary) -> LineKind {
        let words = line_words(line);
        if words.is_empty() {
            return LineKind::Lyric;
        }

        let total = words.len();
        let chords = words.iter().filter(|word| vocab.is_chord_like(word)).count();
        let non_chords = total - chords;

        let kind = if chords == total {
            LineKind::Chord
        } else if total > self.config.long_line_words && non_chords > 0 {
            LineKind::Lyric
        } else if chords as f64 / total as f64 >= self.config.chord_ratio {
            LineKind::Chord
        } else {
            LineKind::Lyric
        };

        trace!(line, total, chords, ?kind, "Classified line");
        kind
    }
}

/// Classify with the default thresholds
pub fn classify_line(line: &str, vocab: &ChordVocabulary) -> LineKind {
    LineClassifier::default().classify(line, vocab)
}
