//! # Transposition
//!
//! Shifts chord roots around the 12-tone pitch circle. Only the root and its accidental move;
//! the quality suffix (`m`, `7`, `maj7`, `sus4`, ...) is carried over untouched.
//!
//! Flat spellings are folded onto their sharp equivalents before lookup, so results are always
//! spelled with sharps. A shift of zero is special: it returns the input spelling exactly as
//! written, flats included.
//!
//! ## Example
//! ```rust
//! use chordsheet::transpose::{transpose_chord, transpose_symbol};
//!
//! assert_eq!(transpose_chord("G", "7", 2), "A7");
//! assert_eq!(transpose_symbol("C", -1), "B");
//! assert_eq!(transpose_symbol("Db", 12), "C#");
//! assert_eq!(transpose_symbol("Db", 0), "Db");
//! ```

/// Canonical sharp spellings, indexed by semitones above C
pub const PITCH_CIRCLE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings folded onto the sharp spelling of the same pitch
const FLAT_ALIASES: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// Map a flat root to its sharp alias; any other root is returned as-is.
pub fn normalize_root(root: &str) -> &str {
    FLAT_ALIASES
        .iter()
        .find(|(flat, _)| *flat == root)
        .map(|(_, sharp)| *sharp)
        .unwrap_or(root)
}

/// Position of a root on the pitch circle (C = 0 .. B = 11).
///
/// Returns `None` for spellings outside the circle and alias table, such as `E#` or `Cb`.
pub fn semitone_index(root: &str) -> Option<usize> {
    let normalized = normalize_root(root);
    PITCH_CIRCLE.iter().position(|pitch| *pitch == normalized)
}

/// Split a compact chord symbol into its `[A-G][#b]?` root and quality suffix.
///
/// The root letter must be upper-case. Returns `None` when the symbol does not start with a
/// note letter.
pub fn split_symbol(symbol: &str) -> Option<(&str, &str)> {
    let bytes = symbol.as_bytes();
    match bytes.first() {
        Some(b'A'..=b'G') => {}
        _ => return None,
    }
    let root_len = match bytes.get(1) {
        Some(b'#') | Some(b'b') => 2,
        _ => 1,
    };
    Some(symbol.split_at(root_len))
}

/// Transpose a root (letter plus optional accidental) by `semitones`.
///
/// Any integer offset is accepted; it is reduced modulo 12. Unknown roots come back unchanged.
pub fn transpose_root(root: &str, semitones: i32) -> String {
    if semitones == 0 {
        return root.to_string();
    }
    let Some(index) = semitone_index(root) else {
        return root.to_string();
    };
    let new_index = (index as i64 + i64::from(semitones)).rem_euclid(12) as usize;
    PITCH_CIRCLE[new_index].to_string()
}

/// Transpose a chord given as separate root and quality.
pub fn transpose_chord(root: &str, quality: &str, semitones: i32) -> String {
    let mut chord = transpose_root(root, semitones);
    chord.push_str(quality);
    chord
}

/// Transpose a compact chord symbol such as `F#m7`.
///
/// Symbols that do not start with a note letter are returned unchanged.
pub fn transpose_symbol(symbol: &str, semitones: i32) -> String {
    if semitones == 0 {
        return symbol.to_string();
    }
    match split_symbol(symbol) {
        Some((root, quality)) => transpose_chord(root, quality, semitones),
        None => symbol.to_string(),
    }
}
