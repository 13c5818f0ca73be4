//! Document text extraction.
//!
//! Maps an uploaded file (name plus bytes) to one [`ExtractionStrategy`] by
//! extension and runs it. Each strategy is terminal: there is no fallback
//! from one to another.
//!
//! | Extension     | Strategy      | Outcome                                      |
//! |---------------|---------------|----------------------------------------------|
//! | `txt`, `md`   | `PlainText`   | UTF-8 text, no warning                       |
//! | `rtf`         | `Rtf`         | markup stripped, line breaks kept, warning   |
//! | anything else | `Unsupported` | instructional placeholder, warning           |
//!
//! Binary formats such as PDF and DOCX are never parsed. They get a
//! placeholder asking the user to paste the text instead, so the engine
//! never reports text it did not really read.

use camino::Utf8Path;
use regex::{Captures, Regex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::DEFAULT_MAX_INPUT_BYTES;
use crate::error::ExtractionError;

/// Text used when an RTF file contains no extractable characters.
pub const RTF_EMPTY_PLACEHOLDER: &str =
    "[No readable text was found in this RTF file. Please paste the content manually.]";

const RTF_FORMATTING_WARNING: &str =
    "RTF formatting was discarded; only the plain text was kept.";
const RTF_EMPTY_WARNING: &str = "No extractable text was found in the RTF file.";

/// One RTF token per match, tried in order:
///
/// - `hex`: `\'hh` escaped byte
/// - `uni`: `\uN` Unicode escape plus its one-character fallback
/// - `word`: control word such as `\par`, `\fs24`, `\li-720`
/// - `sym`: control symbol, a backslash and one non-letter
/// - a group brace or a raw line break, both invisible
///
/// The space delimiting a control word is left in place, so formatting
/// changes between words never glue them together.
static RTF_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\\'(?P<hex>[0-9A-Fa-f]{2})",
        r"|\\u(?P<uni>-?\d+) ?(?:\\'[0-9A-Fa-f]{2}|[^\\{}])?",
        r"|\\(?P<word>[A-Za-z]+)-?\d*",
        r"|\\(?P<sym>[^A-Za-z])",
        r"|[{}\r\n]",
    ))
    .expect("valid regex")
});

/// Whitespace other than newlines; newlines carry paragraph breaks.
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Windows-1252 characters for bytes 0x80..=0x9F. `None` marks the five
/// undefined code points.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// How a file's bytes are turned into text, decided once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// UTF-8 text (`.txt`, `.md`).
    PlainText,
    /// Rich Text Format, lightly stripped (`.rtf`).
    Rtf,
    /// Anything else; the user is asked to paste the text manually.
    Unsupported,
}

impl ExtractionStrategy {
    /// Pick a strategy from the file name's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Self {
        match extension_of(filename).as_str() {
            "txt" | "md" => Self::PlainText,
            "rtf" => Self::Rtf,
            _ => Self::Unsupported,
        }
    }

    /// Returns the strategy name as used in JSON output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain-text",
            Self::Rtf => "rtf",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful extraction: analyzable text and an optional warning.
///
/// Built once per upload and consumed straight away by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    /// The text to analyze.
    pub text: String,
    /// Set when extraction was lossy or fell back to a placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// The strategy that produced this result.
    pub strategy: ExtractionStrategy,
}

/// Limits applied at the ingestion boundary by [`ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Reject inputs larger than this many bytes. `None` disables the check.
    pub max_bytes: Option<usize>,
    /// Fail with [`ExtractionError::UnsupportedFormat`] instead of returning
    /// the paste-manually placeholder.
    pub strict: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            strict: false,
        }
    }
}

/// Extract analyzable text from an in-memory file.
///
/// Never raises [`ExtractionError::UnsupportedFormat`]; unknown formats
/// succeed with a placeholder and a warning. Size limits are the caller's
/// job (see [`ingest`]).
///
/// # Errors
///
/// - [`ExtractionError::ReadError`] when a text format is not valid UTF-8.
/// - [`ExtractionError::EmptyContent`] when a plain-text file has no
///   non-whitespace characters.
#[tracing::instrument(skip(bytes), fields(size = bytes.len()))]
pub fn extract(filename: &str, bytes: &[u8]) -> Result<ExtractionResult, ExtractionError> {
    let strategy = ExtractionStrategy::from_filename(filename);
    tracing::debug!(%strategy, "dispatching extraction");

    match strategy {
        ExtractionStrategy::PlainText => {
            let text = decode(filename, bytes)?;
            if text.trim().is_empty() {
                return Err(ExtractionError::EmptyContent {
                    filename: filename.to_string(),
                });
            }
            Ok(ExtractionResult {
                text,
                warning: None,
                strategy,
            })
        }
        ExtractionStrategy::Rtf => {
            let raw = decode(filename, bytes)?;
            let stripped = strip_rtf(&raw);
            let (text, warning) = if stripped.is_empty() {
                (RTF_EMPTY_PLACEHOLDER.to_string(), RTF_EMPTY_WARNING)
            } else {
                (stripped, RTF_FORMATTING_WARNING)
            };
            tracing::debug!(warning, "rtf extraction was lossy");
            Ok(ExtractionResult {
                text,
                warning: Some(warning.to_string()),
                strategy,
            })
        }
        ExtractionStrategy::Unsupported => {
            let extension = extension_of(filename);
            tracing::debug!(%extension, "declining to extract unsupported format");
            Ok(ExtractionResult {
                text: unsupported_placeholder(filename),
                warning: Some(unsupported_warning(&extension)),
                strategy,
            })
        }
    }
}

/// Extract text at the ingestion boundary, enforcing [`IngestOptions`].
///
/// # Errors
///
/// Everything [`extract`] returns, plus [`ExtractionError::FileTooLarge`]
/// when `bytes` exceeds `options.max_bytes`, and
/// [`ExtractionError::UnsupportedFormat`] for unsupported formats when
/// `options.strict` is set.
#[tracing::instrument(skip(bytes, options), fields(size = bytes.len(), strict = options.strict))]
pub fn ingest(
    filename: &str,
    bytes: &[u8],
    options: &IngestOptions,
) -> Result<ExtractionResult, ExtractionError> {
    if let Some(limit) = options.max_bytes
        && bytes.len() > limit
    {
        return Err(ExtractionError::FileTooLarge {
            size: bytes.len(),
            limit,
        });
    }

    let strategy = ExtractionStrategy::from_filename(filename);
    if options.strict && strategy == ExtractionStrategy::Unsupported {
        return Err(ExtractionError::UnsupportedFormat {
            extension: extension_of(filename),
        });
    }

    extract(filename, bytes)
}

/// Remove RTF markup, keeping only the visible text.
///
/// `\par`, `\line`, `\sect`, `\page`, and `\row` become line breaks, so
/// paragraphs survive. `\tab` and `\cell` become spaces. `\'hh` escapes are
/// decoded as Windows-1252 and `\uN` escapes as Unicode (assuming the
/// default one-character fallback). Other control words and symbols, group
/// braces, and raw line breaks in the source are dropped. Each line has its
/// whitespace collapsed and trimmed, and blank lines are removed.
///
/// Destination groups (font and color tables) are not interpreted, so their
/// literal contents may survive.
pub fn strip_rtf(raw: &str) -> String {
    let text = RTF_TOKEN.replace_all(raw, |caps: &Captures<'_>| rtf_replacement(caps));
    text.lines()
        .map(|line| HORIZONTAL_SPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn rtf_replacement(caps: &Captures<'_>) -> String {
    if let Some(hex) = caps.name("hex") {
        return u8::from_str_radix(hex.as_str(), 16)
            .ok()
            .and_then(cp1252_char)
            .map(String::from)
            .unwrap_or_default();
    }
    if let Some(code) = caps.name("uni") {
        // Code points above 32767 are written as negative 16-bit values.
        return code
            .as_str()
            .parse::<i32>()
            .ok()
            .map(|n| if n < 0 { n + 0x1_0000 } else { n })
            .and_then(|n| u32::try_from(n).ok())
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default();
    }
    if let Some(word) = caps.name("word") {
        let replacement = match word.as_str() {
            "par" | "line" | "sect" | "page" | "row" => "\n",
            "tab" | "cell" => " ",
            "emdash" => "\u{2014}",
            "endash" => "\u{2013}",
            "bullet" => "\u{2022}",
            "lquote" => "\u{2018}",
            "rquote" => "\u{2019}",
            "ldblquote" => "\u{201C}",
            "rdblquote" => "\u{201D}",
            _ => "",
        };
        return replacement.to_string();
    }
    if let Some(sym) = caps.name("sym") {
        let replacement = match sym.as_str() {
            literal @ ("\\" | "{" | "}") => literal,
            "~" => " ",
            "_" => "-",
            // A backslash before a raw line break is an old spelling of \par.
            "\n" | "\r" => "\n",
            _ => "",
        };
        return replacement.to_string();
    }
    String::new()
}

fn cp1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => CP1252_HIGH[usize::from(byte - 0x80)],
        _ => Some(char::from(byte)),
    }
}

fn decode(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec()).map_err(|source| ExtractionError::ReadError {
        filename: filename.to_string(),
        source,
    })
}

/// Lowercased extension of `filename`, or `""` when it has none.
///
/// A leading dot marks a hidden file, not an extension: `.md` and `.txt`
/// have no extension and are unsupported.
fn extension_of(filename: &str) -> String {
    Utf8Path::new(filename)
        .extension()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn unsupported_placeholder(filename: &str) -> String {
    format!(
        "[Text could not be extracted automatically from \"{filename}\". \
         Open the document, copy its text, and paste it here to analyze it.]"
    )
}

fn unsupported_warning(extension: &str) -> String {
    if extension.is_empty() {
        "Files without an extension cannot be read automatically; paste the text manually."
            .to_string()
    } else {
        format!(".{extension} files cannot be read automatically; paste the text manually.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_from_extension_is_case_insensitive() {
        let cases = [
            ("notes.txt", ExtractionStrategy::PlainText),
            ("README.MD", ExtractionStrategy::PlainText),
            ("letter.Rtf", ExtractionStrategy::Rtf),
            ("paper.pdf", ExtractionStrategy::Unsupported),
            ("report.docx", ExtractionStrategy::Unsupported),
            ("Makefile", ExtractionStrategy::Unsupported),
            ("archive.txt.gz", ExtractionStrategy::Unsupported),
        ];
        for (name, expected) in cases {
            assert_eq!(ExtractionStrategy::from_filename(name), expected, "{name}");
        }
    }

    #[test]
    fn dotfile_name_has_no_extension() {
        assert_eq!(ExtractionStrategy::from_filename(".md"), ExtractionStrategy::Unsupported);
        assert_eq!(ExtractionStrategy::from_filename(".txt"), ExtractionStrategy::Unsupported);
        let result = extract(".txt", b"hidden notes").unwrap();
        assert!(result.warning.unwrap().contains("without an extension"));
        // A hidden file with a real extension is still recognized.
        assert_eq!(ExtractionStrategy::from_filename(".notes.md"), ExtractionStrategy::PlainText);
    }

    #[test]
    fn plain_text_passes_through_without_warning() {
        let result = extract("a.txt", b"abc").unwrap();
        assert_eq!(result.text, "abc");
        assert!(result.warning.is_none());
        assert_eq!(result.strategy, ExtractionStrategy::PlainText);
    }

    #[test]
    fn markdown_is_kept_verbatim() {
        let result = extract("doc.md", b"# Title\n\nBody *text*.\n").unwrap();
        assert_eq!(result.text, "# Title\n\nBody *text*.\n");
        assert!(result.warning.is_none());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let err = extract("bad.txt", &[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ReadError { ref filename, .. } if filename == "bad.txt"
        ));
    }

    #[test]
    fn whitespace_only_text_is_empty_content() {
        let err = extract("blank.txt", b"  \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyContent { .. }));
        let err = extract("zero.md", b"").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyContent { .. }));
    }

    #[test]
    fn rtf_control_words_are_stripped() {
        let rtf = br"{\rtf1\ansi Hello \b bold\b0 world.\par}";
        let result = extract("doc.rtf", rtf).unwrap();
        assert_eq!(result.text, "Hello bold world.");
        assert_eq!(result.warning.as_deref(), Some(RTF_FORMATTING_WARNING));
        assert_eq!(result.strategy, ExtractionStrategy::Rtf);
    }

    #[test]
    fn rtf_line_breaks_separate_words_and_paragraphs() {
        let rtf = br"{\rtf1\ansi first line\par second line\line third\tab fourth}";
        let result = extract("doc.rtf", rtf).unwrap();
        assert_eq!(result.text, "first line\nsecond line\nthird fourth");

        let snapshot = crate::analyze::analyze(&result.text);
        assert_eq!(snapshot.word_count, 6);
        assert_eq!(snapshot.paragraph_count, 3);

        assert_eq!(strip_rtf(r"one\par two"), "one\ntwo");
        assert_eq!(strip_rtf(r"one\sect two"), "one\ntwo");
        assert_eq!(strip_rtf("first\\par\r\nsecond"), "first\nsecond");
    }

    #[test]
    fn rtf_hex_escapes_decode_as_windows_1252() {
        let result = extract("doc.rtf", br"{\rtf1 caf\'e9 na\'efve}").unwrap();
        assert_eq!(result.text, "caf\u{e9} na\u{ef}ve");
        assert_eq!(strip_rtf(r"\'93quoted\'94"), "\u{201C}quoted\u{201D}");
        assert_eq!(strip_rtf(r"5\'80"), "5\u{20AC}");
        // 0x81 is undefined in Windows-1252.
        assert_eq!(strip_rtf(r"a\'81b"), "ab");
    }

    #[test]
    fn rtf_unicode_escapes_skip_their_fallback() {
        assert_eq!(strip_rtf(r"caf\u233?"), "caf\u{e9}");
        assert_eq!(strip_rtf(r"\u-3913 x"), "\u{F0B7}");
        assert_eq!(strip_rtf(r"\uc1\u8212-long"), "\u{2014}long");
    }

    #[test]
    fn rtf_symbols_and_escaped_braces() {
        assert_eq!(strip_rtf(r"caf\'e9 \~ok \par next"), "caf\u{e9} ok\nnext");
        assert_eq!(strip_rtf(r"\{x\} \\ y"), r"{x} \ y");
        assert_eq!(strip_rtf(r"well\_known\emdash done"), "well-known\u{2014} done");
    }

    #[test]
    fn rtf_without_text_gets_placeholder() {
        let result = extract("empty.rtf", br"{\rtf1\ansi\deff0\par}").unwrap();
        assert_eq!(result.text, RTF_EMPTY_PLACEHOLDER);
        assert_eq!(result.warning.as_deref(), Some(RTF_EMPTY_WARNING));
    }

    #[test]
    fn rtf_invalid_utf8_is_a_read_error() {
        let err = extract("bad.rtf", &[0x7b, 0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, ExtractionError::ReadError { .. }));
    }

    #[test]
    fn pdf_is_declined_with_placeholder() {
        let result = extract("paper.pdf", b"%PDF-1.7 binary junk \x00\x01").unwrap();
        assert!(result.text.contains("paper.pdf"));
        assert!(result.text.contains("paste"));
        let warning = result.warning.expect("unsupported formats always warn");
        assert!(warning.contains(".pdf"));
        assert_eq!(result.strategy, ExtractionStrategy::Unsupported);
    }

    #[test]
    fn unsupported_never_reads_bytes() {
        // Invalid UTF-8 is irrelevant when the format is declined.
        let result = extract("legacy.doc", &[0xd0, 0xcf, 0x11, 0xe0]).unwrap();
        assert!(result.warning.is_some());
    }

    #[test]
    fn missing_extension_warning() {
        let result = extract("LICENSE", b"MIT").unwrap();
        assert!(result.warning.unwrap().contains("without an extension"));
    }

    #[test]
    fn ingest_rejects_oversized_input() {
        let options = IngestOptions {
            max_bytes: Some(4),
            strict: false,
        };
        let err = ingest("a.txt", b"hello", &options).unwrap_err();
        assert!(matches!(err, ExtractionError::FileTooLarge { size: 5, limit: 4 }));
        assert!(ingest("a.txt", b"hell", &options).is_ok());
    }

    #[test]
    fn ingest_without_limit_accepts_anything() {
        let options = IngestOptions {
            max_bytes: None,
            strict: false,
        };
        let big = "word ".repeat(10_000);
        assert!(ingest("a.txt", big.as_bytes(), &options).is_ok());
    }

    #[test]
    fn ingest_strict_rejects_unsupported() {
        let options = IngestOptions {
            strict: true,
            ..IngestOptions::default()
        };
        let err = ingest("paper.PDF", b"%PDF", &options).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::UnsupportedFormat { ref extension } if extension == "pdf"
        ));
        assert!(ingest("notes.txt", b"fine", &options).is_ok());
    }

    #[test]
    fn default_ingest_options() {
        let options = IngestOptions::default();
        assert_eq!(options.max_bytes, Some(5 * 1024 * 1024));
        assert!(!options.strict);
    }
}
