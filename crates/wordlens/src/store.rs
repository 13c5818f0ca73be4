//! File-backed persistence for the last analyzed text.
//!
//! One plain-text file per key inside a data directory. Writes replace the
//! whole file; there is no locking or journaling.

use camino::Utf8PathBuf;
use wordlens_core::config::{Config, user_data_dir};
use wordlens_core::{StoreError, StoreResult, TextStore};

/// A [`TextStore`] that keeps each key in `<dir>/<key>.txt`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Utf8PathBuf,
}

impl FileStore {
    /// Store files under `dir`, creating it on first save.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store files in the configured `data_dir`, or the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when neither is known.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        config
            .data_dir
            .clone()
            .or_else(user_data_dir)
            .map(Self::new)
            .ok_or(StoreError::Unavailable)
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &camino::Utf8Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Utf8PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

impl TextStore for FileStore {
    fn save(&self, key: &str, text: &str) -> StoreResult<()> {
        std::fs::create_dir_all(self.dir.as_std_path()).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        std::fs::write(path.as_std_path(), text).map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(key, dir = %self.dir, "text saved");
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(path.as_std_path()) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
