//! # Segment Composition
//!
//! Drives the whole pipeline for a block of song text:
//!
//! ```text
//! text ──split '\n'──▶ lines ──LineClassifier──▶ Chord | Lyric
//!                                   │
//!                  chord lines ─▶ ChordTokenizer ─▶ spans ─▶ transpose ─▶ Segments
//!                  lyric lines ─────────────────────────────────────────▶ Text
//! ```
//!
//! Lines are independent, so large inputs are fanned out over rayon's pool and collected
//! back in source order. Within a line, neighbouring text spans are merged when
//! `merge_text` is set. Lines are joined with an explicit `"\n"` text segment that is never
//! merged into its neighbours.

use crate::classifier::{LineClassifier, LineKind};
use crate::config::EngineConfig;
use crate::segment::{RenderedLine, Segment};
use crate::tokenizer::{ChordTokenizer, Span};
use crate::transpose::transpose_chord;
use crate::vocabulary::ChordVocabulary;
use rayon::prelude::*;
use tracing::debug;

/// Turns lines into segments for one render pass
pub struct SegmentComposer<'a> {
    vocab: &'a ChordVocabulary,
    classifier: LineClassifier,
    transpose: i32,
    merge_text: bool,
}

impl<'a> SegmentComposer<'a> {
    pub fn new(vocab: &'a ChordVocabulary, transpose: i32, config: &EngineConfig) -> Self {
        Self {
            vocab,
            classifier: LineClassifier::new(config.classifier.clone()),
            transpose,
            merge_text: config.merge_text,
        }
    }

    fn push_text(&self, segments: &mut Vec<Segment>, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.merge_text {
            if let Some(Segment::Text(last)) = segments.last_mut() {
                last.push_str(text);
                return;
            }
        }
        segments.push(Segment::Text(text.to_string()));
    }

    /// Classify, tokenize and transpose a single line
    pub fn compose_line(&self, index: usize, line: &str) -> RenderedLine {
        let kind = self.classifier.classify(line, self.vocab);
        let mut segments = Vec::new();

        match kind {
            LineKind::Lyric => self.push_text(&mut segments, line),
            LineKind::Chord => {
                for span in ChordTokenizer::new(line, self.vocab).tokenize() {
                    match span {
                        Span::Text { start, end } => {
                            self.push_text(&mut segments, &line[start..end])
                        }
                        Span::Chord(chord) => {
                            let rendered = if self.transpose == 0 {
                                chord.text.clone()
                            } else {
                                transpose_chord(&chord.root, &chord.quality, self.transpose)
                            };
                            segments.push(Segment::Chord {
                                original: chord.text,
                                rendered,
                            });
                        }
                    }
                }
            }
        }

        RenderedLine {
            index,
            kind,
            segments,
        }
    }
}

/// Render every line of `text`, in source order
pub fn render_lines(
    text: &str,
    vocab: &ChordVocabulary,
    transpose: i32,
    config: &EngineConfig,
) -> Vec<RenderedLine> {
    let lines: Vec<&str> = text.split('\n').collect();
    let composer = SegmentComposer::new(vocab, transpose, config);

    let parallel = config.parallel_threshold > 0 && lines.len() >= config.parallel_threshold;
    let rendered: Vec<RenderedLine> = if parallel {
        lines
            .par_iter()
            .enumerate()
            .map(|(index, line)| composer.compose_line(index, line))
            .collect()
    } else {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| composer.compose_line(index, line))
            .collect()
    };

    debug!(
        lines = rendered.len(),
        chord_lines = rendered.iter().filter(|l| l.kind == LineKind::Chord).count(),
        transpose,
        parallel,
        "Rendered text"
    );
    rendered
}

/// Flatten rendered lines, separating them with `"\n"` text segments
pub fn join_lines(lines: Vec<RenderedLine>) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            segments.push(Segment::Text("\n".to_string()));
        }
        segments.extend(line.segments);
    }
    segments
}
