//! Configuration loading and discovery.
//!
//! Configuration is merged from, highest precedence first:
//! 1. `WORDLENS_*` environment variables
//! 2. Explicit files (e.g. `--config`)
//! 3. `wordlens.<ext>` then `.wordlens.<ext>` in the current directory or
//!    the closest parent that has one (the search stops at `.git`)
//! 4. `~/.config/wordlens/config.<ext>` (user config)
//! 5. Built-in defaults
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. When several files
//! exist in the same directory they are all merged; later extensions win:
//! toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use wordlens_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("upload limit: {:?}", config.input_limit());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_INPUT_BYTES;
use crate::error::{ConfigError, ConfigResult};
use crate::extract::IngestOptions;

/// The configuration for wordlens.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (no file logging when unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum upload size in bytes (default: 5 MiB).
    ///
    /// Checked before extraction so oversized documents never reach the
    /// analyzer. Use `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored. Default: `false`.
    pub disable_input_limit: bool,
    /// Fail on unsupported file formats instead of returning the
    /// paste-manually placeholder.
    pub strict_extraction: bool,
    /// Save every analyzed text so the next run can restore it with `--last`.
    pub remember_text: bool,
    /// Directory for the remembered text (falls back to platform defaults if unset).
    pub data_dir: Option<Utf8PathBuf>,
}

impl Config {
    /// Effective upload size ceiling, `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// Ingestion options derived from this configuration.
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            max_bytes: self.input_limit(),
            strict: self.strict_extraction,
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "wordlens";

/// Project discovery never walks above a directory containing this entry.
const BOUNDARY_MARKER: &str = ".git";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/wordlens/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialize`] if any source holds invalid values.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = Self::find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // WORDLENS_MAX_INPUT_BYTES=1048576, WORDLENS_LOG_LEVEL=debug, etc.
        figment = figment.merge(Env::prefixed("WORDLENS_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            input_limit = ?config.input_limit(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from `start`.
    ///
    /// Returns every match from the closest directory that has any, ordered
    /// low to high precedence: dotfiles first, then regular names, each in
    /// [`CONFIG_EXTENSIONS`] order.
    fn find_project_configs(start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let dotfiles = CONFIG_EXTENSIONS.iter().map(|ext| format!(".{APP_NAME}.{ext}"));
            let regular = CONFIG_EXTENSIONS.iter().map(|ext| format!("{APP_NAME}.{ext}"));
            let found: Vec<Utf8PathBuf> = dotfiles
                .chain(regular)
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                tracing::debug!(%dir, count = found.len(), "project config found");
                return found;
            }
            // A config beside the marker counts; nothing above it does.
            if dir.join(BOUNDARY_MARKER).exists() {
                break;
            }
        }
        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config() -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the project directories for XDG-compliant path resolution.
fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/wordlens/` on Linux, `~/Library/Application Support/wordlens/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// Get the user data directory path, where the last analyzed text is kept.
///
/// Returns `~/.local/share/wordlens/` on Linux, `~/Library/Application Support/wordlens/`
/// on macOS, and equivalent on other platforms.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf()).ok()
}
