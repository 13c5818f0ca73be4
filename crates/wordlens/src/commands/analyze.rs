//! Analyze command: word, sentence, and paragraph statistics plus readability.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use wordlens_core::config::Config;
use wordlens_core::{AnalysisSnapshot, IngestOptions, Session, TextStore, ingest};

use super::{print_warning, read_input};
use crate::store::FileStore;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// File to analyze (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Analyze this text instead of a file.
    #[arg(long, conflicts_with_all = ["file", "last"])]
    pub text: Option<String>,

    /// Re-analyze the last remembered text.
    #[arg(long, conflicts_with = "file")]
    pub last: bool,

    /// Remember the analyzed text for a later `--last`.
    #[arg(long)]
    pub remember: bool,

    /// Fail on formats that cannot be extracted instead of analyzing a placeholder.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    snapshot: &'a AnalysisSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'a str>,
}

/// Analyze a file, stdin, literal text, or the remembered text.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file, last = args.last))]
pub fn cmd_analyze(args: AnalyzeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let mut options = config.ingest_options();
    options.strict |= args.strict;
    let remember = args.remember || config.remember_text;

    debug!(remember, strict = options.strict, "executing analyze command");

    if remember || args.last {
        let store = FileStore::from_config(config).context("cannot remember text")?;
        debug!(dir = %store.dir(), "using file store");
        run(Session::new(store), args, global_json, &options)
    } else {
        run(Session::without_store(), args, global_json, &options)
    }
}

fn run<S: TextStore>(
    mut session: Session<S>,
    args: AnalyzeArgs,
    global_json: bool,
    options: &IngestOptions,
) -> anyhow::Result<()> {
    if args.last {
        if session.restore()?.is_none() {
            bail!("no remembered text; run `wordlens analyze --remember` first");
        }
    } else if let Some(text) = args.text {
        session.set_text(text);
    } else {
        let (name, bytes) = read_input(args.file.as_deref(), options.max_bytes)?;
        let result =
            ingest(&name, &bytes, options).with_context(|| format!("cannot ingest {name}"))?;
        session.apply_extraction(result);
    }

    if let Some(warning) = session.warning() {
        print_warning(warning);
    }

    let snapshot = session.snapshot();
    if global_json {
        let output = AnalyzeOutput {
            snapshot,
            warning: session.warning(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_snapshot(snapshot);
    }

    Ok(())
}

fn label(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string()
}

fn print_snapshot(s: &AnalysisSnapshot) {
    println!("{} {}", label("Words:"), s.word_count);
    println!(
        "{} {} ({} without spaces)",
        label("Characters:"),
        s.char_count,
        s.char_count_no_spaces
    );
    println!("{} {}", label("Sentences:"), s.sentence_count);
    println!("{} {}", label("Paragraphs:"), s.paragraph_count);
    if !s.longest_word.is_empty() {
        println!("{} {}", label("Longest word:"), s.longest_word);
    }
    println!("{} {:.1}", label("Avg word length:"), s.avg_word_length);
    println!(
        "{} {:.1}",
        label("Avg sentence length:"),
        s.avg_sentence_length
    );
    println!("{} {} min", label("Reading time:"), s.reading_time_minutes);
    println!("{} {} min", label("Speaking time:"), s.speaking_time_minutes);
    println!("{} {:.1}", label("Readability:"), s.readability_score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordlens_core::MemoryStore;

    #[test]
    fn literal_text_succeeds() {
        let args = AnalyzeArgs {
            text: Some("Hello world. How are you?".to_string()),
            ..AnalyzeArgs::default()
        };
        assert!(cmd_analyze(args, true, &Config::default()).is_ok());
    }

    #[test]
    fn last_without_remembered_text_fails() {
        let args = AnalyzeArgs {
            last: true,
            ..AnalyzeArgs::default()
        };
        let err = run(
            Session::new(MemoryStore::new()),
            args,
            false,
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no remembered text"));
    }

    #[test]
    fn output_flattens_snapshot_and_omits_missing_warning() {
        let snapshot = wordlens_core::analyze("One two.");
        let output = AnalyzeOutput {
            snapshot: &snapshot,
            warning: None,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["word_count"], 2);
        assert!(json.get("warning").is_none());
    }
}
