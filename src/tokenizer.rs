//! # Chord Tokenizer
//!
//! Finds chord symbols inside a line that has already been classified as a chord line.
//!
//! Scanning is character based rather than word based because chord lines are padded with
//! arbitrary runs of spaces to sit above the right syllable. The scanner makes one left to
//! right pass:
//!
//! 1. Find the next `A`..`G`. Everything before it is text.
//! 2. Skip any whitespace after the letter. If a `#` or `b` follows, it joins the candidate
//!    together with the skipped whitespace.
//! 3. Extend through lower-case letters and digits (the quality: `m`, `maj7`, `sus4`, ...).
//! 4. Keep the candidate if the vocabulary contains it or shares its root.
//! 5. Otherwise only the starting letter becomes text and scanning resumes one character
//!    later, so a rejected guess never swallows the start of a later chord.
//!
//! Offsets are byte offsets into the line. The returned spans tile the line exactly.
//!
//! ## Example
//! ```rust
//! use chordsheet::{tokenize_line, ChordVocabulary, Span};
//!
//! let vocab = ChordVocabulary::new(["C", "G"])?;
//! let line = "C   G7";
//! let spans = tokenize_line(line, &vocab);
//! let pieces: Vec<&str> = spans.iter().map(|s| s.as_str(line)).collect();
//! assert_eq!(pieces, vec!["C", "   ", "G7"]);
//! assert!(matches!(&spans[2], Span::Chord(c) if c.root == "G" && c.quality == "7"));
//! # Ok::<(), chordsheet::ChordsheetError>(())
//! ```

use crate::vocabulary::ChordVocabulary;
use tracing::trace;

/// A validated chord found in a line
#[derive(Debug, Clone, PartialEq)]
pub struct ChordCandidate {
    /// Byte offset of the root letter
    pub start: usize,
    /// Byte offset just past the last consumed character
    pub end: usize,
    /// Verbatim source text, including whitespace between root and accidental
    pub text: String,
    /// Root letter and accidental without whitespace, e.g. `F#`
    pub root: String,
    /// Quality suffix, e.g. `m7`
    pub quality: String,
}

impl ChordCandidate {
    /// Compact symbol: root followed by quality
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.quality)
    }
}

/// A piece of a tokenized line
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// Verbatim text at `start..end`
    Text { start: usize, end: usize },
    /// A recognized chord
    Chord(ChordCandidate),
}

impl Span {
    pub fn start(&self) -> usize {
        match self {
            Span::Text { start, .. } => *start,
            Span::Chord(chord) => chord.start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Span::Text { end, .. } => *end,
            Span::Chord(chord) => chord.end,
        }
    }

    /// Source text covered by this span
    pub fn as_str<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start()..self.end()]
    }
}

/// Single-pass chord scanner over one line
pub struct ChordTokenizer<'a> {
    line: &'a str,
    vocab: &'a ChordVocabulary,
    position: usize,
}

impl<'a> ChordTokenizer<'a> {
    pub fn new(line: &'a str, vocab: &'a ChordVocabulary) -> Self {
        Self {
            line,
            vocab,
            position: 0,
        }
    }

    /// Start scanning at a byte offset instead of the beginning of the line.
    ///
    /// Offsets inside a multi-byte character move forward to the next character boundary.
    pub fn with_position(mut self, position: usize) -> Self {
        let mut position = position.min(self.line.len());
        while !self.line.is_char_boundary(position) {
            position += 1;
        }
        self.position = position;
        self
    }

    /// Current scan position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Offset of the next note letter at or after the scan position
    fn next_root(&self) -> Option<usize> {
        self.line.as_bytes()[self.position..]
            .iter()
            .position(|b| matches!(b, b'A'..=b'G'))
            .map(|offset| self.position + offset)
    }

    /// Greedily scan a candidate starting at the note letter at `start`
    fn scan_candidate(&self, start: usize) -> ChordCandidate {
        let bytes = self.line.as_bytes();
        let mut root = String::from(bytes[start] as char);
        let mut end = start + 1;

        let rest = &self.line[end..];
        let accidental_at = end + (rest.len() - rest.trim_start().len());
        if let Some(&accidental @ (b'#' | b'b')) = bytes.get(accidental_at) {
            root.push(accidental as char);
            end = accidental_at + 1;
        }

        let quality_start = end;
        while end < bytes.len() && (bytes[end].is_ascii_lowercase() || bytes[end].is_ascii_digit())
        {
            end += 1;
        }

        ChordCandidate {
            start,
            end,
            text: self.line[start..end].to_string(),
            root,
            quality: self.line[quality_start..end].to_string(),
        }
    }

    fn is_valid(&self, candidate: &ChordCandidate) -> bool {
        self.vocab.contains(&candidate.symbol()) || self.vocab.shares_root(&candidate.root)
    }

    /// Scan the rest of the line into spans
    pub fn tokenize(mut self) -> Vec<Span> {
        let mut spans = Vec::new();

        while let Some(start) = self.next_root() {
            if self.position < start {
                spans.push(Span::Text {
                    start: self.position,
                    end: start,
                });
            }

            let candidate = self.scan_candidate(start);
            if self.is_valid(&candidate) {
                self.position = candidate.end;
                spans.push(Span::Chord(candidate));
            } else {
                trace!(candidate = %candidate.text, start, "Rejected chord candidate");
                self.position = start + 1;
                spans.push(Span::Text {
                    start,
                    end: start + 1,
                });
            }
        }

        if self.position < self.line.len() {
            spans.push(Span::Text {
                start: self.position,
                end: self.line.len(),
            });
        }
        spans
    }
}

/// Tokenize a whole line
pub fn tokenize_line(line: &str, vocab: &ChordVocabulary) -> Vec<Span> {
    ChordTokenizer::new(line, vocab).tokenize()
}
