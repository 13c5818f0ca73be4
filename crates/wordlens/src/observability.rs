//! Logging and tracing setup.
//!
//! Human-readable logs always go to stderr so stdout stays clean for
//! command output. When a log directory or path is configured, a JSONL
//! copy is written through a non-blocking appender.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "wordlens.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact log file path (`WORDLENS_LOG_PATH`). Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for `wordlens.jsonl` (`WORDLENS_LOG_DIR`, then config).
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the environment, falling back to the configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os("WORDLENS_LOG_PATH").map(PathBuf::from),
            log_dir: std::env::var_os("WORDLENS_LOG_DIR")
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }

    /// Directory and file name for the JSONL log, if file logging is on.
    fn file_target(&self) -> Option<(PathBuf, PathBuf)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path.file_name().map(PathBuf::from)?;
            return Some((dir, name));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), PathBuf::from(LOG_FILE_NAME)))
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` steps up from the configured level (debug, then trace).
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit; dropping it flushes the file writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.file_target() {
        Some((dir, name)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, &name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
