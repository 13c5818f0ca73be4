//! Core library for wordlens.
//!
//! A text analysis and ingestion engine. Raw text goes in, an immutable
//! [`AnalysisSnapshot`] of counts and derived metrics comes out. Uploaded
//! files are turned into text first by the [`extract`] dispatcher.
//!
//! # Modules
//!
//! - [`tokenize`] - Unicode-aware word splitting
//! - [`segment`] - Sentence and paragraph splitting
//! - [`metrics`] - Counts, averages, timings, and the readability score
//! - [`extract`] - File-extension dispatch into plain text
//! - [`analyze`] - The analysis entry point
//! - [`session`] - Current text plus an optional persistence collaborator
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use wordlens_core::{analyze, extract};
//!
//! let snapshot = analyze("Hello world. How are you?");
//! assert_eq!(snapshot.word_count, 5);
//! assert_eq!(snapshot.sentence_count, 2);
//!
//! let upload = extract("notes.txt", b"abc").unwrap();
//! assert_eq!(upload.text, "abc");
//! assert!(upload.warning.is_none());
//! ```
#![deny(unsafe_code)]

pub mod analyze;
pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod segment;
pub mod session;
pub mod tokenize;

pub use analyze::{Analyzer, analyze};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ExtractionError, StoreError, StoreResult};
pub use extract::{ExtractionResult, ExtractionStrategy, IngestOptions, extract, ingest};
pub use metrics::{AnalysisSnapshot, compute};
pub use segment::{split_paragraphs, split_sentences};
pub use session::{LAST_TEXT_KEY, MemoryStore, NoStore, Session, TextStore};
pub use tokenize::tokenize;

/// Default upload size ceiling: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
