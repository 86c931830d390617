//! Error types for `mfiles-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. None of these errors are
//! fatal: the dispatcher always returns to a valid browsing state after
//! surfacing one.

use std::fmt;
use std::path::PathBuf;

/// A single clipboard source that could not be pasted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPath {
    /// The staged source path.
    pub path: PathBuf,
    /// Human-readable reason (collision, permission, vanished source, ...).
    pub reason: String,
}

impl fmt::Display for FailedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.reason)
    }
}

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A directory could not be enumerated (missing, not a directory,
    /// permission denied, deleted mid-read). The listing stays at its
    /// last good state.
    #[error("cannot read directory {}: {reason}", .path.display())]
    DirectoryUnreadable { path: PathBuf, reason: String },

    /// A file name typed into a dialog is empty or contains a path separator.
    #[error("invalid name: {0:?}")]
    NameInvalid(String),

    /// The target name is already taken in the destination directory.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// One or more clipboard sources failed during a paste batch.
    /// The remaining sources were still attempted.
    #[error("{} of {attempted} item(s) failed: {}", .failed.len(), join_failed(.failed))]
    OperationPartialFailure {
        failed: Vec<FailedPath>,
        attempted: usize,
    },

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

fn join_failed(failed: &[FailedPath]) -> String {
    failed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias used throughout `mfiles-core`.
pub type CoreResult<T> = Result<T, CoreError>;
