//! Editing session: current text, its snapshot, and optional persistence.
//!
//! A [`Session`] accepts full-text mutations (never diffs) and extraction
//! results, re-analyzes synchronously, and keeps the latest snapshot. It
//! is single-threaded, so the snapshot always belongs to the most recently
//! submitted text.
//!
//! Persistence is an explicit collaborator behind [`TextStore`]. Saving is
//! fire-and-forget: a failed save is logged and never surfaces as an
//! analysis error.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::analyze::Analyzer;
use crate::error::StoreResult;
use crate::extract::ExtractionResult;
use crate::metrics::AnalysisSnapshot;

/// Key under which the last submitted text is stored.
pub const LAST_TEXT_KEY: &str = "last-text";

/// Storage for the last analyzed text, keyed by a fixed string.
pub trait TextStore {
    /// Persist `text` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the backing
    /// medium cannot be written.
    fn save(&self, key: &str, text: &str) -> StoreResult<()>;

    /// Load the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](crate::error::StoreError) if the backing
    /// medium exists but cannot be read.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
}

/// In-process [`TextStore`], useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextStore for MemoryStore {
    fn save(&self, key: &str, text: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }
}

/// A store that keeps nothing. Used by [`Session::without_store`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStore;

impl TextStore for NoStore {
    fn save(&self, _key: &str, _text: &str) -> StoreResult<()> {
        Ok(())
    }

    fn load(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }
}

/// The current text and its latest analysis.
#[derive(Debug)]
pub struct Session<S: TextStore> {
    store: S,
    analyzer: Analyzer,
    text: String,
    snapshot: AnalysisSnapshot,
    last_warning: Option<String>,
}

impl Session<NoStore> {
    /// Create a session that does not persist anything.
    pub fn without_store() -> Self {
        Self::new(NoStore)
    }
}

impl<S: TextStore> Session<S> {
    /// Create a session over `store`, starting from empty text.
    pub fn new(store: S) -> Self {
        let mut analyzer = Analyzer::new();
        let snapshot = analyzer.analyze("");
        Self {
            store,
            analyzer,
            text: String::new(),
            snapshot,
            last_warning: None,
        }
    }

    /// Replace the current text and re-analyze it.
    pub fn set_text(&mut self, text: impl Into<String>) -> &AnalysisSnapshot {
        self.last_warning = None;
        self.replace(text.into());
        self.persist();
        &self.snapshot
    }

    /// Adopt the text of an extraction result, keeping its warning.
    pub fn apply_extraction(&mut self, result: ExtractionResult) -> &AnalysisSnapshot {
        tracing::debug!(strategy = %result.strategy, "applying extraction result");
        self.last_warning = result.warning;
        self.replace(result.text);
        self.persist();
        &self.snapshot
    }

    /// Reload the last stored text, if there is one, and analyze it.
    ///
    /// Restoring does not write back to the store.
    ///
    /// # Errors
    ///
    /// Propagates the store's load failure, since the caller asked for the
    /// restore explicitly.
    pub fn restore(&mut self) -> StoreResult<Option<&AnalysisSnapshot>> {
        match self.store.load(LAST_TEXT_KEY)? {
            Some(text) => {
                self.last_warning = None;
                self.replace(text);
                Ok(Some(&self.snapshot))
            }
            None => Ok(None),
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The snapshot of the current text.
    pub const fn snapshot(&self) -> &AnalysisSnapshot {
        &self.snapshot
    }

    /// Warning carried by the most recent extraction, if the current text
    /// came from one.
    pub fn warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn replace(&mut self, text: String) {
        self.snapshot = self.analyzer.analyze(&text);
        self.text = text;
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(LAST_TEXT_KEY, &self.text) {
            tracing::warn!(error = %err, "failed to persist text; continuing");
        }
    }
}
