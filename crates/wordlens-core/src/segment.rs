//! Sentence and paragraph segmentation.
//!
//! Both splitters are punctuation and line-break heuristics, not grammar
//! models. A period after an abbreviation such as `Dr.` or `e.g.` ends a
//! sentence like any other period; that over-splitting is a known
//! limitation and there is no abbreviation dictionary to correct it.

use regex::Regex;
use std::sync::LazyLock;

/// A run of sentence terminators acting as a single boundary.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// One or more line feeds.
static PARAGRAPH_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));

/// Split text into sentences on `.`, `!`, and `?`.
///
/// Consecutive terminators collapse into one split point, so
/// `"Wait... really?!"` yields `["Wait", "really"]`. Results are trimmed
/// and empty pieces are dropped. Terminators are not kept.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    split_trimmed(&SENTENCE_BOUNDARY, text)
}

/// Split text into paragraphs on one or more newlines.
///
/// Unlike prose-oriented splitters, a single newline already starts a new
/// paragraph. Results are trimmed and empty pieces are dropped.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    split_trimmed(&PARAGRAPH_BOUNDARY, text)
}

fn split_trimmed(boundary: &Regex, text: &str) -> Vec<String> {
    boundary
        .split(text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
