// ============================================================================
// vidtag-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Run-level error types for vidtag-core
//
// Only conditions that stop a whole run are errors here. Per-file problems
// (probe failures, name conflicts, failed renames) are carried as values in
// the rename plan so the batch keeps moving.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a vidtag run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid folder '{}': {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for vidtag-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidRoot {
        path: path.into(),
        reason: reason.into(),
    }
}
