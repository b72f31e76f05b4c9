//! Transcript sanitization.
//!
//! The recognition engine may annotate each line with a timestamp range
//! (`[00:00:00.000 --> 00:00:04.240]`). Sanitization strips those
//! annotations, trims each line, drops empties, and joins the survivors
//! with single spaces into one newline-free transcript.

use std::sync::LazyLock;

use regex::Regex;

/// Timestamp range annotation emitted by the recognition engine.
static TIMESTAMP_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d{2}:\d{2}:\d{2}\.\d{3} --> \d{2}:\d{2}:\d{2}\.\d{3}\]")
        .expect("timestamp pattern compiles")
});

/// Clean raw engine output into a single-line transcript.
///
/// Line order is preserved; a transcript with no surviving lines is the
/// empty string.
pub fn sanitize_transcript(raw: &str) -> String {
    raw.lines()
        .filter_map(|line| {
            let cleaned = TIMESTAMP_RANGE.replace_all(line, "");
            let trimmed = cleaned.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
