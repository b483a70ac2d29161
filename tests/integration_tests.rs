//! Integration tests for the chordsheet engine
//!
//! Drives the public API end to end: classification, tokenizing, transposition and
//! composition, plus vocabulary/config loading from files.

use chordsheet::{
    classify_line, load_vocabulary, original_text, render, render_lines, render_with_config,
    rendered_text, transpose_symbol, ChordVocabulary, ChordsheetError, Engine, EngineConfig,
    LineKind, RenderRequest, Segment,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

fn vocab() -> ChordVocabulary {
    ChordVocabulary::new([
        "C", "D", "E", "F", "G", "A", "B", "Cm", "Dm", "Em", "C7", "G7",
    ])
    .unwrap()
}

fn chord(original: &str, rendered: &str) -> Segment {
    Segment::Chord {
        original: original.to_string(),
        rendered: rendered.to_string(),
    }
}

fn text(s: &str) -> Segment {
    Segment::Text(s.to_string())
}

#[test]
fn test_spaced_chord_line_with_root_family_match() {
    let v = vocab();
    let line = "C       G        Am";
    assert_eq!(classify_line(line, &v), LineKind::Chord);

    let segments = render(line, &v, 0);
    let chords: Vec<&str> = segments
        .iter()
        .filter(|s| s.is_chord())
        .map(Segment::original)
        .collect();
    assert_eq!(chords, vec!["C", "G", "Am"]);
    assert_eq!(original_text(&segments), line);
}

#[test]
fn test_long_lyric_line_is_not_highlighted() {
    let v = vocab();
    let line = "I love the C major feel";
    assert_eq!(classify_line(line, &v), LineKind::Lyric);
    assert_eq!(render(line, &v, 4), vec![text(line)]);
}

#[test]
fn test_transpose_keeps_quality_suffix() {
    assert_eq!(render("G7", &vocab(), 2), vec![chord("G7", "A7")]);
}

#[test]
fn test_flat_spelling_survives_zero_transpose() {
    let v = ChordVocabulary::new(vocab().symbols().chain(["C#"])).unwrap();
    assert_eq!(render("Db", &v, 0), vec![chord("Db", "Db")]);
    assert_eq!(render("Db", &v, 12), vec![chord("Db", "C#")]);
    assert_eq!(render("Db", &v, 1), vec![chord("Db", "D")]);
}

#[test]
fn test_whitespace_line_is_single_text_segment() {
    let v = vocab();
    assert_eq!(classify_line(" \t  ", &v), LineKind::Lyric);
    assert_eq!(render(" \t  ", &v, 3), vec![text(" \t  ")]);
}

#[test]
fn test_negative_transpose_wraps_to_b() {
    assert_eq!(transpose_symbol("C", -1), "B");
    assert_eq!(render("C", &vocab(), -1), vec![chord("C", "B")]);
}

#[test]
fn test_full_song_round_trip_and_transpose() {
    let v = vocab();
    let song = "\
[Verse 1]
C              G        Am       F
Amazing grace, how sweet the sound
C        G7       C
That saved a wretch like me

  Em   Dm7  (C)
";
    let segments = render(song, &v, 0);
    assert_eq!(original_text(&segments), song);
    assert_eq!(rendered_text(&segments), song);

    let up = render(song, &v, 2);
    assert_eq!(original_text(&up), song);
    assert_eq!(
        rendered_text(&up),
        "\
[Verse 1]
D              A        Bm       G
Amazing grace, how sweet the sound
D        A7       D
That saved a wretch like me

  F#m   Em7  (D)
"
    );
}

#[test]
fn test_rendered_lines_follow_source_order() {
    let v = vocab();
    let lines = render_lines("C G\nla la la la\n\nDm", &v, 0, &EngineConfig::default());
    let kinds: Vec<(usize, LineKind)> = lines.iter().map(|l| (l.index, l.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (0, LineKind::Chord),
            (1, LineKind::Lyric),
            (2, LineKind::Lyric),
            (3, LineKind::Chord),
        ]
    );
    for (line, source) in lines.iter().zip("C G\nla la la la\n\nDm".split('\n')) {
        assert_eq!(original_text(&line.segments), source);
    }
}

#[test]
fn test_crlf_input_round_trips() {
    let v = vocab();
    let song = "C   G\r\nhello world it is me\r\n";
    let segments = render(song, &v, 5);
    assert_eq!(original_text(&segments), song);
    assert_eq!(rendered_text(&segments), "F   C\r\nhello world it is me\r\n");
}

#[test]
fn test_degraded_vocabulary_renders_plain_text() {
    let song = "C G Am\nwords";
    let segments = render(song, &ChordVocabulary::empty(), 7);
    assert!(segments.iter().all(|s| !s.is_chord()));
    assert_eq!(rendered_text(&segments), song);
}

#[test]
fn test_parallel_render_matches_sequential() {
    let v = vocab();
    let song = (0..400)
        .map(|i| match i % 3 {
            0 => "C    G    Am   F",
            1 => "this is a line of words",
            _ => "",
        })
        .collect::<Vec<_>>()
        .join("\n");
    let sequential = EngineConfig {
        parallel_threshold: 0,
        ..EngineConfig::default()
    };
    let parallel = EngineConfig {
        parallel_threshold: 10,
        ..EngineConfig::default()
    };
    assert_eq!(
        render_with_config(&song, &v, -4, &sequential),
        render_with_config(&song, &v, -4, &parallel)
    );
}

#[test]
fn test_load_vocabulary_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chords.yaml");
    fs::write(
        &path,
        "chords:\n  - symbol: C\n    name: C major\n  - symbol: G7\n  - Am\n",
    )
    .unwrap();

    let v = load_vocabulary(&path).unwrap();
    assert_eq!(v.symbols().collect::<Vec<_>>(), vec!["C", "G7", "Am"]);
}

#[test]
fn test_load_vocabulary_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chords.json");
    fs::write(&path, r#"[{"symbol": "F#m"}, {"symbol": "Bb", "frets": "x13331"}]"#).unwrap();

    let v = load_vocabulary(&path).unwrap();
    assert!(v.contains("f#m"));
    assert!(v.shares_root("A#7"));
}

#[test]
fn test_load_vocabulary_errors() {
    let dir = tempfile::tempdir().unwrap();

    let empty = dir.path().join("empty.json");
    fs::write(&empty, "[]").unwrap();
    assert!(matches!(
        load_vocabulary(&empty),
        Err(ChordsheetError::EmptyVocabulary)
    ));

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        load_vocabulary(&missing),
        Err(ChordsheetError::Io { .. })
    ));

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "chords: {a: [").unwrap();
    assert!(matches!(
        load_vocabulary(&broken),
        Err(ChordsheetError::VocabularyError { .. })
    ));
}

#[test]
fn test_config_file_resolves_relative_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("chordsheet.yaml");
    fs::write(
        &config_path,
        "vocabulary: chords.yaml\nclassifier:\n  long-line-words: 4\n",
    )
    .unwrap();

    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.vocabulary, Some(dir.path().join("chords.yaml")));
    assert_eq!(config.classifier.long_line_words, 4);
}

#[test]
fn test_engine_request_round_trip_over_json() {
    let engine = Engine::new(vocab());
    let request: RenderRequest =
        serde_json::from_str(r#"{"text": "Em  C\nla la la la", "transposeSemitones": -2}"#)
            .unwrap();
    let response = engine.render(&request);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "segments": [
                { "kind": "chord", "original": "Em", "rendered": "Dm" },
                { "kind": "text", "original": "  ", "rendered": "  " },
                { "kind": "chord", "original": "C", "rendered": "A#" },
                { "kind": "text", "original": "\n", "rendered": "\n" },
                { "kind": "text", "original": "la la la la", "rendered": "la la la la" }
            ]
        })
    );
    assert_eq!(response.original_text(), request.text);
}

#[test]
fn test_concurrent_refresh_never_tears_a_render() {
    let c_only = ChordVocabulary::new(["C"]).unwrap();
    let d_only = ChordVocabulary::new(["D"]).unwrap();
    let engine = Engine::new(c_only.clone());
    let request = RenderRequest {
        text: "C\nD\nC\nD".to_string(),
        transpose_semitones: 0,
    };
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..200 {
                let next = if i % 2 == 0 { d_only.clone() } else { c_only.clone() };
                engine.refresh_vocabulary(next);
            }
            done.store(true, Ordering::SeqCst);
        });

        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::SeqCst) {
                    let response = engine.render(&request);
                    let chords: Vec<&str> = response
                        .segments
                        .iter()
                        .filter(|s| s.is_chord())
                        .map(Segment::original)
                        .collect();
                    assert!(
                        chords == vec!["C", "C"] || chords == vec!["D", "D"],
                        "render mixed two vocabularies: {:?}",
                        chords
                    );
                }
            });
        }
    });
}
