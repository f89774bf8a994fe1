//! Error types for drl-highlight
//!
//! Scanning and highlight mapping cannot fail. These errors belong to the
//! layers around them: document edits, config loading and file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for drl-highlight operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Invalid edit {start}..{end} for text of length {len}")]
    InvalidEdit { start: usize, end: usize, len: usize },

    #[error("Unknown style: {0}")]
    UnknownStyle(String),
}
