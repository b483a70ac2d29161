//! # Render Engine
//!
//! Request/response surface for callers that re-render the same text with different
//! transpositions (e.g. "transpose up" / "transpose down" buttons).
//!
//! The engine holds the shared [`VocabularyStore`] and the [`EngineConfig`]. Each call to
//! [`Engine::render`] pins one vocabulary snapshot for its whole pass; nothing else is kept
//! between calls, so identical requests give identical responses.
//!
//! ## Example
//! ```rust
//! use chordsheet::{ChordVocabulary, Engine, RenderRequest};
//!
//! let engine = Engine::new(ChordVocabulary::new(["C", "G", "Am"])?);
//! let response = engine.render(&RenderRequest {
//!     text: "C   G\nHello".to_string(),
//!     transpose_semitones: 2,
//! });
//! assert_eq!(response.rendered_text(), "D   A\nHello");
//! # Ok::<(), chordsheet::ChordsheetError>(())
//! ```

use crate::compose::{join_lines, render_lines};
use crate::config::EngineConfig;
use crate::segment::{original_text, rendered_text, Segment};
use crate::vocabulary::{ChordVocabulary, VocabularyStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// A render call: `{ "text": ..., "transposeSemitones": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub text: String,
    #[serde(default)]
    pub transpose_semitones: i32,
}

/// Ordered segments for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub segments: Vec<Segment>,
}

impl RenderResponse {
    /// Source text, reassembled from the segments
    pub fn original_text(&self) -> String {
        original_text(&self.segments)
    }

    /// Display text, with transposed chords
    pub fn rendered_text(&self) -> String {
        rendered_text(&self.segments)
    }
}

/// Stateless renderer over a refreshable vocabulary
#[derive(Debug, Default)]
pub struct Engine {
    store: VocabularyStore,
    config: EngineConfig,
}

impl Engine {
    pub fn new(vocab: ChordVocabulary) -> Self {
        Self::with_config(vocab, EngineConfig::default())
    }

    pub fn with_config(vocab: ChordVocabulary, config: EngineConfig) -> Self {
        if vocab.is_empty() {
            warn!("Chord vocabulary is empty; every line will be treated as lyrics");
        }
        Self {
            store: VocabularyStore::new(vocab),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current vocabulary snapshot
    pub fn vocabulary(&self) -> Arc<ChordVocabulary> {
        self.store.snapshot()
    }

    /// Swap in a new vocabulary; renders already running keep the old one
    pub fn refresh_vocabulary(&self, vocab: ChordVocabulary) {
        if vocab.is_empty() {
            warn!("Refreshed chord vocabulary is empty; every line will be treated as lyrics");
        }
        self.store.refresh(vocab);
    }

    pub fn render(&self, request: &RenderRequest) -> RenderResponse {
        let vocab = self.store.snapshot();
        let lines = render_lines(
            &request.text,
            &vocab,
            request.transpose_semitones,
            &self.config,
        );
        RenderResponse {
            segments: join_lines(lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request: RenderRequest =
            serde_json::from_str(r#"{"text": "C G", "transposeSemitones": -3}"#).unwrap();
        assert_eq!(request.transpose_semitones, -3);

        let request: RenderRequest = serde_json::from_str(r#"{"text": "C G"}"#).unwrap();
        assert_eq!(request.transpose_semitones, 0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let engine = Engine::new(ChordVocabulary::new(["C", "G", "D"]).unwrap());
        let request = RenderRequest {
            text: "C  G  D\nwords go here and there".to_string(),
            transpose_semitones: 5,
        };
        assert_eq!(engine.render(&request), engine.render(&request));
    }

    #[test]
    fn test_refresh_applies_to_next_render() {
        let engine = Engine::new(ChordVocabulary::new(["C"]).unwrap());
        let request = RenderRequest {
            text: "D".to_string(),
            transpose_semitones: 0,
        };
        assert!(!engine.render(&request).segments[0].is_chord());

        engine.refresh_vocabulary(ChordVocabulary::new(["D"]).unwrap());
        assert!(engine.render(&request).segments[0].is_chord());
    }

    #[test]
    fn test_default_engine_runs_degraded() {
        let engine = Engine::default();
        let response = engine.render(&RenderRequest {
            text: "C G Am".to_string(),
            transpose_semitones: 1,
        });
        assert_eq!(response.segments, vec![Segment::Text("C G Am".to_string())]);
    }
}
