use crate::segment::Segment;

/// Convert rendered segments to an HTML fragment.
///
/// Text is escaped verbatim; chords become `<span class="chord">` elements carrying their
/// source spelling in `data-original`. The whole sheet sits in a `<pre>` so column alignment
/// between chord and lyric lines survives.
pub fn to_html(segments: &[Segment]) -> String {
    let mut html = String::new();

    html.push_str(r#"<pre class="chordsheet">"#);
    for segment in segments {
        html.push_str(&segment_to_html(segment));
    }
    html.push_str("</pre>\n");

    html
}

fn segment_to_html(segment: &Segment) -> String {
    match segment {
        Segment::Text(text) => escape_html(text),
        Segment::Chord { original, rendered } => format!(
            r#"<span class="chord" data-original="{}">{}</span>"#,
            escape_html(original),
            escape_html(rendered)
        ),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
