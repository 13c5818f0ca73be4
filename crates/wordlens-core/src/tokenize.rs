//! Unicode-aware word tokenization.
//!
//! A word is a maximal run of characters between separators, where a
//! separator is any `White_Space` code point or any code point in a
//! `Punctuation` general category. Runs without at least one `Letter`
//! are dropped, so bare numbers and symbols never count as words while
//! mixed tokens such as `W3C` do.

use regex::Regex;
use std::sync::LazyLock;

/// One or more whitespace or punctuation code points.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{White_Space}\p{P}]+").expect("valid regex"));

/// Any code point in a Unicode `Letter` category.
static LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}").expect("valid regex"));

/// Split text into words, preserving order and duplicates.
///
/// Never fails: empty or all-punctuation input yields an empty vector.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<String> {
    SEPARATOR
        .split(text)
        .filter(|fragment| !fragment.is_empty() && LETTER.is_match(fragment))
        .map(str::to_string)
        .collect()
}
