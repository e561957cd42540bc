//! Error types for the licr-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the licr library.
#[derive(Error, Debug)]
pub enum LicrError {
    /// The text source could not produce text for a document.
    #[error("text source error: {0}")]
    Source(#[from] SourceError),

    /// Receipt metadata could not be loaded.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while acquiring the raw text of a document.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document does not exist.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The document exists but its text could not be read.
    #[error("document unreadable: {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// The document produced no text at all.
    #[error("document has no text: {}", .0.display())]
    Empty(PathBuf),

    /// The configured extraction program is not installed.
    #[error("text extraction program not found: {0}")]
    ProgramNotFound(String),

    /// The extraction program ran but exited unsuccessfully.
    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },
}

/// Result type for the licr library.
pub type Result<T> = std::result::Result<T, LicrError>;
