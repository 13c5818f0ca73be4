//! Extract command: print the analyzable text of a document.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use wordlens_core::config::Config;
use wordlens_core::ingest;

use super::{print_warning, read_input};

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// File to extract (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Fail on formats that cannot be extracted instead of printing a placeholder.
    #[arg(long)]
    pub strict: bool,
}

/// Extract text from a file and print it, or the full result with `--json`.
#[instrument(name = "cmd_extract", skip_all, fields(file = ?args.file))]
pub fn cmd_extract(args: ExtractArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let mut options = config.ingest_options();
    options.strict |= args.strict;

    let (name, bytes) = read_input(args.file.as_deref(), options.max_bytes)?;
    let result = ingest(&name, &bytes, &options).with_context(|| format!("cannot ingest {name}"))?;
    debug!(strategy = %result.strategy, chars = result.text.chars().count(), "extracted");

    if let Some(ref warning) = result.warning {
        print_warning(warning);
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.text);
    }

    Ok(())
}
