//! Derived text metrics and the readability score.
//!
//! [`compute`] turns tokenizer and segmenter output into an
//! [`AnalysisSnapshot`]. Every division is guarded, so this stage is total.
//!
//! # Readability
//!
//! The score is a deliberately simple heuristic on a 0–100 scale, not
//! Flesch-Kincaid:
//!
//! ```text
//! 100
//!   - min(avg_word_length * 2,     40)
//!   - min(avg_sentence_length * 0.5, 30)
//!   + 5   if 200 <= word_count <= 1000
//! clamped to [0, 100]
//! ```
//!
//! Higher means easier to read. The averages fed into the formula are the
//! one-decimal values stored on the snapshot.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reading speed used for [`AnalysisSnapshot::reading_time_minutes`].
pub const READING_WORDS_PER_MINUTE: usize = 200;

/// Speaking speed used for [`AnalysisSnapshot::speaking_time_minutes`].
pub const SPEAKING_WORDS_PER_MINUTE: usize = 150;

const WORD_LENGTH_WEIGHT: f64 = 2.0;
const WORD_LENGTH_PENALTY_CAP: f64 = 40.0;
const SENTENCE_LENGTH_WEIGHT: f64 = 0.5;
const SENTENCE_LENGTH_PENALTY_CAP: f64 = 30.0;
const LENGTH_BONUS: f64 = 5.0;
const LENGTH_BONUS_RANGE: std::ops::RangeInclusive<usize> = 200..=1000;

/// One complete analysis pass over a text.
///
/// A pure function of the input text: the same string always produces an
/// identical snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisSnapshot {
    /// Number of words (see [`crate::tokenize`]).
    pub word_count: usize,
    /// Number of characters, whitespace included.
    pub char_count: usize,
    /// Number of non-whitespace characters.
    pub char_count_no_spaces: usize,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Number of paragraphs.
    pub paragraph_count: usize,
    /// Longest word by character count; the first one wins ties.
    pub longest_word: String,
    /// Mean characters per word, one decimal.
    pub avg_word_length: f64,
    /// Mean words per sentence, one decimal.
    pub avg_sentence_length: f64,
    /// Minutes to read silently at 200 words per minute, rounded up.
    pub reading_time_minutes: u64,
    /// Minutes to read aloud at 150 words per minute, rounded up.
    pub speaking_time_minutes: u64,
    /// Readability heuristic in `[0, 100]`, one decimal.
    pub readability_score: f64,
}

/// Derive the snapshot for `text` from its words, sentences, and paragraphs.
#[tracing::instrument(skip_all, fields(text_len = text.len(), words = words.len()))]
pub fn compute(
    text: &str,
    words: &[String],
    sentences: &[String],
    paragraphs: &[String],
) -> AnalysisSnapshot {
    let word_count = words.len();
    let sentence_count = sentences.len();

    let char_count = text.chars().count();
    let char_count_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();

    let total_word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_word_length = round1(ratio(total_word_chars, word_count));
    let avg_sentence_length = round1(ratio(word_count, sentence_count));

    AnalysisSnapshot {
        word_count,
        char_count,
        char_count_no_spaces,
        sentence_count,
        paragraph_count: paragraphs.len(),
        longest_word: longest_word(words).to_string(),
        avg_word_length,
        avg_sentence_length,
        reading_time_minutes: minutes_at(word_count, READING_WORDS_PER_MINUTE),
        speaking_time_minutes: minutes_at(word_count, SPEAKING_WORDS_PER_MINUTE),
        readability_score: readability_score(avg_word_length, avg_sentence_length, word_count),
    }
}

/// Score readability from the two averages and the word count.
///
/// Always returns a finite value in `[0.0, 100.0]`.
pub fn readability_score(avg_word_length: f64, avg_sentence_length: f64, word_count: usize) -> f64 {
    let mut score = 100.0;
    score -= (avg_word_length * WORD_LENGTH_WEIGHT).min(WORD_LENGTH_PENALTY_CAP);
    score -= (avg_sentence_length * SENTENCE_LENGTH_WEIGHT).min(SENTENCE_LENGTH_PENALTY_CAP);
    if LENGTH_BONUS_RANGE.contains(&word_count) {
        score += LENGTH_BONUS;
    }
    round1(score.clamp(0.0, 100.0))
}

/// First word with the maximum character count, or `""` for no words.
fn longest_word(words: &[String]) -> &str {
    let mut best: Option<(&str, usize)> = None;
    for word in words {
        let len = word.chars().count();
        // Strictly greater keeps the earliest word on ties.
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((word.as_str(), len));
        }
    }
    best.map_or("", |(word, _)| word)
}

fn minutes_at(word_count: usize, words_per_minute: usize) -> u64 {
    word_count.div_ceil(words_per_minute) as u64
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input_is_all_zero() {
        let snap = compute("", &[], &[], &[]);
        assert_eq!(snap.word_count, 0);
        assert_eq!(snap.char_count, 0);
        assert_eq!(snap.sentence_count, 0);
        assert_eq!(snap.paragraph_count, 0);
        assert_eq!(snap.longest_word, "");
        assert_eq!(snap.avg_word_length, 0.0);
        assert_eq!(snap.avg_sentence_length, 0.0);
        assert_eq!(snap.reading_time_minutes, 0);
        assert_eq!(snap.speaking_time_minutes, 0);
        assert_eq!(snap.readability_score, 100.0);
    }

    #[test]
    fn character_counts() {
        let text = "a b\tc\nd é";
        let snap = compute(text, &[], &[], &[]);
        assert_eq!(snap.char_count, 9);
        assert_eq!(snap.char_count_no_spaces, 5);
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let words = owned(&["one", "three", "seven"]);
        let sentences = owned(&["one three", "seven"]);
        let snap = compute("one three. seven.", &words, &sentences, &owned(&["x"]));
        // (3 + 5 + 5) / 3 = 4.333..
        assert_eq!(snap.avg_word_length, 4.3);
        assert_eq!(snap.avg_sentence_length, 1.5);
    }

    #[test]
    fn zero_sentences_guarded() {
        let words = owned(&["hello"]);
        let snap = compute("hello", &words, &[], &[]);
        assert_eq!(snap.avg_sentence_length, 0.0);
        assert!(snap.readability_score.is_finite());
    }

    #[test]
    fn longest_word_first_occurrence_wins() {
        let words = owned(&["cat", "horse", "mouse", "ox"]);
        assert_eq!(longest_word(&words), "horse");
    }

    #[test]
    fn longest_word_counts_chars_not_bytes() {
        // "ééé" is 6 bytes but 3 chars; "abcd" is 4 chars.
        let words = owned(&["ééé", "abcd"]);
        assert_eq!(longest_word(&words), "abcd");
    }

    #[test]
    fn reading_time_ceiling_at_boundary() {
        assert_eq!(minutes_at(0, READING_WORDS_PER_MINUTE), 0);
        assert_eq!(minutes_at(1, READING_WORDS_PER_MINUTE), 1);
        assert_eq!(minutes_at(200, READING_WORDS_PER_MINUTE), 1);
        assert_eq!(minutes_at(201, READING_WORDS_PER_MINUTE), 2);
        assert_eq!(minutes_at(150, SPEAKING_WORDS_PER_MINUTE), 1);
        assert_eq!(minutes_at(151, SPEAKING_WORDS_PER_MINUTE), 2);
    }

    #[test]
    fn readability_formula() {
        // 100 - 4.0*2 - 10.0*0.5 = 87
        assert_eq!(readability_score(4.0, 10.0, 50), 87.0);
        // Same averages inside the bonus window.
        assert_eq!(readability_score(4.0, 10.0, 200), 92.0);
        assert_eq!(readability_score(4.0, 10.0, 1000), 92.0);
        assert_eq!(readability_score(4.0, 10.0, 1001), 87.0);
    }

    #[test]
    fn readability_penalties_are_capped() {
        // 100 - 40 - 30 = 30, no matter how extreme the averages get.
        assert_eq!(readability_score(10_000.0, 10_000.0, 1), 30.0);
        assert_eq!(readability_score(10_000.0, 10_000.0, 500), 35.0);
    }

    #[test]
    fn readability_clamped_to_hundred() {
        // 100 - 0 - 0 + 5 would be 105.
        assert_eq!(readability_score(0.0, 0.0, 300), 100.0);
    }

    #[test]
    fn snapshot_serializes_with_snake_case_fields() {
        let words = owned(&["Hi", "there"]);
        let snap = compute("Hi there.", &words, &owned(&["Hi there"]), &owned(&["Hi there."]));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["longest_word"], "there");
        assert_eq!(json["reading_time_minutes"], 1);
        assert!(json["readability_score"].is_f64());
    }
}
