//! Error types for map page output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or writing the map page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the map payload.
    #[error("failed to serialize map payload: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
