//! Error types for `fpick-core`.
//!
//! All fallible operations in the core library return [`PickerResult<T>`],
//! which is an alias for `Result<T, PickerError>`. Listing and storage
//! failures are usually converted to empty results at their boundary and
//! reported to the host instead of being propagated.

use std::path::{Path, PathBuf};

/// Unified error type for all picker operations.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Storage enumeration produced no root that passed validation.
    #[error("no accessible storage found")]
    NoAccessibleStorage,

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PickerError {
    /// Maps an `io::Error` raised while accessing `path` to the most
    /// specific variant.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }
}

/// Convenience alias used throughout `fpick-core`.
pub type PickerResult<T> = Result<T, PickerError>;
