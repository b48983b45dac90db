//! Error types for imgnum operations.

use std::path::PathBuf;

use imgnum_core::FormatError;
use imgnum_store::StoreError;
use thiserror::Error;

/// Errors that can occur during imgnum operations.
#[derive(Debug, Error)]
pub enum ImgnumError {
    /// The container or seal content is invalid.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Reading or writing an artifact failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An image could not be decoded or encoded.
    #[error("image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Decimal export refused by the configured size guard.
    #[error("payload of {payload_len} bytes exceeds the decimal export limit of {limit} bytes")]
    DecimalTooLarge { payload_len: u64, limit: u64 },
}

impl ImgnumError {
    pub(crate) fn image(path: &std::path::Path, source: image::ImageError) -> Self {
        Self::Image {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for imgnum operations.
pub type Result<T> = std::result::Result<T, ImgnumError>;
