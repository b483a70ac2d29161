//! # chordsheet
//!
//! Chord-aware lyrics annotation. Takes song text where chord lines sit above lyric lines,
//! works out which lines are chords, finds each chord symbol with its exact position,
//! optionally transposes it, and returns position-preserving segments for display.
//!
//! ## Example
//! ```rust
//! use chordsheet::{render, original_text, rendered_text, ChordVocabulary};
//!
//! let vocab = ChordVocabulary::new(["C", "G", "A", "F"])?;
//! let text = "C        G       Am\nAmazing grace how sweet the sound";
//!
//! let segments = render(text, &vocab, 2);
//! assert_eq!(original_text(&segments), text);
//! assert_eq!(
//!     rendered_text(&segments),
//!     "D        A       Bm\nAmazing grace how sweet the sound"
//! );
//! # Ok::<(), chordsheet::ChordsheetError>(())
//! ```

pub mod classifier;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod html;
pub mod segment;
pub mod tokenizer;
pub mod transpose;
pub mod vocabulary;

pub use classifier::{classify_line, line_words, LineClassifier, LineKind};
pub use compose::{join_lines, render_lines, SegmentComposer};
pub use config::{ClassifierConfig, EngineConfig};
pub use engine::{Engine, RenderRequest, RenderResponse};
pub use error::*;
pub use html::to_html;
pub use segment::{original_text, rendered_text, RenderedLine, Segment, SegmentKind};
pub use tokenizer::{tokenize_line, ChordCandidate, ChordTokenizer, Span};
pub use transpose::{transpose_chord, transpose_symbol};
pub use vocabulary::{load_vocabulary, ChordVocabulary, VocabularyFormat, VocabularyStore};

/// Render song text into segments with the default configuration.
/// This is the main entry point for the library.
pub fn render(text: &str, vocab: &ChordVocabulary, transpose: i32) -> Vec<Segment> {
    render_with_config(text, vocab, transpose, &EngineConfig::default())
}

/// Render with custom classifier thresholds and composition options
pub fn render_with_config(
    text: &str,
    vocab: &ChordVocabulary,
    transpose: i32,
    config: &EngineConfig,
) -> Vec<Segment> {
    join_lines(render_lines(text, vocab, transpose, config))
}
