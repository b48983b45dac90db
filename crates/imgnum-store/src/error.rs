//! Error types for the store module.

use std::io;
use std::path::{Path, PathBuf};

use imgnum_core::FormatError;
use thiserror::Error;

/// Errors that can occur while reading or writing imgnum artifacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The bytes or text on disk are not a valid container or seal.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// I/O error, with the path it happened on.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A folder argument that is not a directory.
    #[error("folder not found: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
