//! Error types for imgnum core.

use thiserror::Error;

/// Errors raised when bytes on disk (or text in a seal) do not describe a
/// valid container or certificate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("bad magic")]
    BadMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("unsupported channel count: {0} (only RGB, 3 channels, is supported)")]
    UnsupportedChannels(u8),

    #[error("unsupported pixel order: {0}")]
    UnsupportedOrder(u8),

    #[error("truncated header: need {need} bytes, have {have}")]
    TruncatedHeader { need: usize, have: usize },

    #[error("image too large for this build: {total} bytes exceeds limit of {max}")]
    TooLarge { total: u64, max: u64 },

    #[error("payload length invalid: declared {declared} bytes, {remaining} remaining")]
    PayloadLengthInvalid { declared: u64, remaining: u64 },

    #[error("payload longer than total bytes: {payload} > {total}")]
    PayloadExceedsTotal { payload: u64, total: u64 },

    #[error("payload is not a minimal big-endian integer")]
    NonMinimalPayload,

    #[error("image has zero size: {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("pixel stream length mismatch: expected {expected} bytes, got {actual}")]
    StreamLength { expected: u64, actual: u64 },

    #[error("malformed seal: {0}")]
    MalformedSeal(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, FormatError>;
