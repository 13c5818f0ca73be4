//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use wordlens_core::ExtractionError;

pub mod analyze;
pub mod extract;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// File name reported for input read from stdin. The `.txt` extension
/// routes it through plain-text extraction.
pub const STDIN_NAME: &str = "stdin.txt";

/// Read the raw bytes of an input file, or stdin when `file` is `None` or `-`.
///
/// Returns the file name used for format detection alongside the bytes.
/// Files are size-checked against `max_bytes` via metadata before being
/// read into memory; stdin is checked later by
/// [`ingest`](wordlens_core::ingest).
pub fn read_input(
    file: Option<&Utf8Path>,
    max_bytes: Option<usize>,
) -> anyhow::Result<(String, Vec<u8>)> {
    let Some(path) = file.filter(|p| p.as_str() != "-") else {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
        return Ok((STDIN_NAME.to_string(), bytes));
    };

    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(limit) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > limit {
            return Err(ExtractionError::FileTooLarge { size, limit })
                .with_context(|| format!("cannot ingest {path}"));
        }
    }

    let bytes =
        std::fs::read(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    let name = path.file_name().unwrap_or(path.as_str()).to_string();
    Ok((name, bytes))
}

/// Print an extraction warning to stderr.
pub fn print_warning(warning: &str) {
    use owo_colors::{OwoColorize, Stream};
    eprintln!(
        "{} {warning}",
        "WARNING:".if_supports_color(Stream::Stderr, |t| t.yellow())
    );
}
