//! # Chord Vocabulary
//!
//! The set of chord symbols the engine is allowed to recognize, plus the helpers used by the
//! data-access side to load it.
//!
//! ## Lookups
//! - **Exact**: case-insensitive match against a member (`am` matches `Am`).
//! - **Root family**: the leading `[A-G][#b]?` of the probe equals the root of some member.
//!   Roots are compared after folding flats onto sharps, so `Db` belongs to the `C#` family.
//!   The root letter must be upper-case; `am` has no root family.
//!
//! ## Sources
//! Vocabulary files may be YAML or JSON and take any of these shapes:
//! ```yaml
//! - C
//! - Am
//! - symbol: G7
//!   name: G dominant seventh
//! ```
//! or a document with a `chords:` list of the same entries. Only the symbol is kept.
//!
//! ## Snapshots
//! [`VocabularyStore`] owns the process-wide vocabulary. Renders take an `Arc` snapshot up
//! front and keep it for the whole pass, so a concurrent [`VocabularyStore::refresh`] never
//! changes the vocabulary under an in-flight render.

use crate::error::{ChordsheetError, Result};
use crate::transpose::{normalize_root, split_symbol};
use arc_swap::ArcSwap;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Root family key of a symbol: its `[A-G][#b]?` prefix with flats folded onto sharps
pub fn root_family(symbol: &str) -> Option<&str> {
    split_symbol(symbol).map(|(root, _)| normalize_root(root))
}

/// Immutable set of canonical chord symbols
#[derive(Debug, Clone, Default)]
pub struct ChordVocabulary {
    symbols: Vec<String>,
    folded: HashSet<String>,
    roots: HashSet<String>,
}

impl ChordVocabulary {
    /// Build a vocabulary from symbol strings.
    ///
    /// Entries are trimmed; blank entries and case-insensitive duplicates are dropped.
    ///
    /// # Errors
    /// Returns [`ChordsheetError::EmptyVocabulary`] if no usable symbol remains.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if symbol.is_empty() || !vocab.folded.insert(symbol.to_lowercase()) {
                continue;
            }
            if let Some(root) = root_family(symbol) {
                vocab.roots.insert(root.to_string());
            }
            vocab.symbols.push(symbol.to_string());
        }

        if vocab.symbols.is_empty() {
            return Err(ChordsheetError::EmptyVocabulary);
        }
        debug!(
            symbols = vocab.symbols.len(),
            roots = vocab.roots.len(),
            "Built chord vocabulary"
        );
        Ok(vocab)
    }

    /// The degraded vocabulary: nothing validates, so every line reads as lyrics
    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-insensitive exact membership
    pub fn contains(&self, symbol: &str) -> bool {
        !self.folded.is_empty() && self.folded.contains(&symbol.to_lowercase())
    }

    /// True if the symbol's root family matches the root of any member
    pub fn shares_root(&self, symbol: &str) -> bool {
        root_family(symbol).is_some_and(|root| self.roots.contains(root))
    }

    /// Exact or root-family match
    pub fn is_chord_like(&self, symbol: &str) -> bool {
        self.contains(symbol) || self.shares_root(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Members in their original spelling and load order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// Serialization format of a vocabulary source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyFormat {
    Yaml,
    Json,
}

impl VocabularyFormat {
    /// `.json` files are JSON; everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// One entry of a vocabulary file
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawEntry {
    Symbol(String),
    Entry {
        #[serde(alias = "chord")]
        symbol: String,
    },
}

impl RawEntry {
    fn into_symbol(self) -> String {
        match self {
            RawEntry::Symbol(symbol) | RawEntry::Entry { symbol } => symbol,
        }
    }
}

/// Top level of a vocabulary file
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawVocabulary {
    List(Vec<RawEntry>),
    Document { chords: Vec<RawEntry> },
}

impl RawVocabulary {
    fn into_symbols(self) -> Vec<String> {
        let entries = match self {
            RawVocabulary::List(entries) | RawVocabulary::Document { chords: entries } => entries,
        };
        entries.into_iter().map(RawEntry::into_symbol).collect()
    }
}

/// Parse the symbol strings out of a vocabulary document.
///
/// `source_name` only labels errors.
pub fn parse_symbols(
    content: &str,
    format: VocabularyFormat,
    source_name: &str,
) -> Result<Vec<String>> {
    let raw: RawVocabulary = match format {
        VocabularyFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| ChordsheetError::vocabulary(source_name, e.to_string()))?,
        VocabularyFormat::Json => serde_json::from_str(content)
            .map_err(|e| ChordsheetError::vocabulary(source_name, e.to_string()))?,
    };
    Ok(raw.into_symbols())
}

/// Read and build a vocabulary from a YAML or JSON file.
///
/// # Errors
/// I/O and parse failures, or [`ChordsheetError::EmptyVocabulary`] if the file lists no symbols.
pub fn load_vocabulary(path: impl AsRef<Path>) -> Result<ChordVocabulary> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ChordsheetError::io(e, path))?;
    let symbols = parse_symbols(
        &content,
        VocabularyFormat::from_path(path),
        &path.display().to_string(),
    )?;
    let vocab = ChordVocabulary::new(symbols)?;
    info!(path = %path.display(), symbols = vocab.len(), "Loaded chord vocabulary");
    Ok(vocab)
}

/// Process-lifetime holder of the current vocabulary snapshot
#[derive(Debug)]
pub struct VocabularyStore {
    current: ArcSwap<ChordVocabulary>,
}

impl VocabularyStore {
    pub fn new(vocab: ChordVocabulary) -> Self {
        Self {
            current: ArcSwap::from_pointee(vocab),
        }
    }

    /// Handle to the current vocabulary; unaffected by later refreshes
    pub fn snapshot(&self) -> Arc<ChordVocabulary> {
        self.current.load_full()
    }

    /// Replace the vocabulary for every render that starts after this call
    pub fn refresh(&self, vocab: ChordVocabulary) {
        info!(symbols = vocab.len(), "Refreshed chord vocabulary");
        self.current.store(Arc::new(vocab));
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new(ChordVocabulary::empty())
    }
}
