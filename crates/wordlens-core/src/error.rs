//! Error types for wordlens-core.
//!
//! Analysis itself is total and has no error type. Only configuration,
//! document extraction, and the persistence collaborator can fail.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors returned when turning an uploaded file into analyzable text.
///
/// These are values, never panics, so a caller can render an inline message
/// and let the user retry.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file format is not text-bearing and strict ingestion was requested.
    #[error("unsupported format: .{extension} files cannot be extracted")]
    UnsupportedFormat {
        /// Lowercased extension, empty when the file name has none.
        extension: String,
    },

    /// The upload exceeds the configured size ceiling.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    FileTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// The ceiling that was exceeded.
        limit: usize,
    },

    /// Extraction succeeded but produced no usable characters.
    #[error("{filename} contains no text")]
    EmptyContent {
        /// Name of the uploaded file.
        filename: String,
    },

    /// The bytes are not valid for the encoding the format claims.
    #[error("failed to read {filename}: {source}")]
    ReadError {
        /// Name of the uploaded file.
        filename: String,
        /// The underlying decoding failure.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Errors raised by a [`TextStore`](crate::session::TextStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed at {path}: {source}")]
    Io {
        /// File the store tried to touch.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No location is available to persist into (e.g. no home directory).
    #[error("no storage location available")]
    Unavailable,
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
