//! Library interface for the `wordlens` CLI.
//!
//! The argument parser, the command implementations, and the MCP server live
//! here so they can be unit tested. The entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`store`] - File-backed persistence for `--remember` / `--last`

pub mod commands;
pub mod store;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                    Log filter (e.g., debug, wordlens=trace)
    WORDLENS_LOG_PATH           Explicit log file path
    WORDLENS_LOG_DIR            Log directory
    WORDLENS_DATA_DIR           Directory for remembered text
    WORDLENS_MAX_INPUT_BYTES    Upload size limit in bytes
    WORDLENS_STRICT_EXTRACTION  Fail on unsupported file formats (true/false)
";
/// Command-line interface definition for wordlens.
#[derive(Parser)]
#[command(name = "wordlens")]
#[command(about = "Text statistics, readability scoring, and document text extraction")]
#[command(long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Count words, sentences, and paragraphs and score readability
    Analyze(commands::analyze::AnalyzeArgs),

    /// Extract plain text from a document
    Extract(commands::extract::ExtractArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_text_conflicts_with_last() {
        let result = Cli::try_parse_from(["wordlens", "analyze", "--last", "--text", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn analyze_accepts_stdin_marker() {
        let cli = Cli::try_parse_from(["wordlens", "--json", "analyze", "-"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.file.as_ref().map(|f| f.as_str()), Some("-"));
            }
            _ => panic!("expected analyze"),
        }
    }
}
