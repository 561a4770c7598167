//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the primary table or the
/// geocode cache.
///
/// An absent cache file is not represented here: cache absence is the
/// documented fallback path, not a failure.
#[derive(Debug, Error)]
pub enum DataLoadError {
    // === File System Errors ===
    /// Primary table file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File is empty or has no header line.
    #[error("no header row found in {path}")]
    NoHeader { path: PathBuf },

    /// File uses an encoding the loader does not support.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Schema Errors ===
    /// Required column not found.
    #[error("required column '{column}' not found in {path} (available: {available})")]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: String,
    },

    /// Header contains the same column name twice.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    /// Header contains an empty column name.
    #[error("empty column name in header of {path}")]
    EmptyColumnName { path: PathBuf },

    // === Table Errors ===
    /// Failed table operation.
    #[error("table operation failed: {message}")]
    Table { message: String },
}

impl From<polars::prelude::PolarsError> for DataLoadError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Table {
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, DataLoadError>;
