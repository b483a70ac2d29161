//! Output segment types
//!
//! The render output is a flat list of [`Segment`]s. Concatenating every segment's
//! `original` text reproduces the input exactly; concatenating `rendered` gives the
//! (possibly transposed) text to display.

use crate::classifier::LineKind;
use serde::Serialize;

/// A styled or plain run of output text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SegmentRecord")]
pub enum Segment {
    /// Verbatim source text
    Text(String),
    /// A recognized chord; `rendered` differs from `original` only when transposed
    Chord { original: String, rendered: String },
}

impl Segment {
    /// Verbatim source text
    pub fn original(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Chord { original, .. } => original,
        }
    }

    /// Text to display
    pub fn rendered(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Chord { rendered, .. } => rendered,
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, Segment::Chord { .. })
    }
}

/// Segment kind on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Chord,
}

/// Wire form of a segment: `{ "kind", "original", "rendered" }`
#[derive(Debug, Clone, Serialize)]
pub struct SegmentRecord {
    pub kind: SegmentKind,
    pub original: String,
    pub rendered: String,
}

impl From<Segment> for SegmentRecord {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Text(text) => SegmentRecord {
                kind: SegmentKind::Text,
                rendered: text.clone(),
                original: text,
            },
            Segment::Chord { original, rendered } => SegmentRecord {
                kind: SegmentKind::Chord,
                original,
                rendered,
            },
        }
    }
}

/// Segments of one source line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLine {
    /// Zero-based line number in the input
    pub index: usize,
    pub kind: LineKind,
    pub segments: Vec<Segment>,
}

/// Concatenate the source text of all segments
pub fn original_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::original).collect()
}

/// Concatenate the display text of all segments
pub fn rendered_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::rendered).collect()
}
