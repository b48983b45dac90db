//! # imgnum
//!
//! The unified API for imgnum: an image read as one very large integer.
//!
//! ## Overview
//!
//! - **Encode**: flatten an image to an RGB stream, store the stream's
//!   minimal big-endian integer in a `.imgnum` container
//! - **Decode**: pad the integer back to full length and write an image
//! - **Fingerprint**: SHA-256 of the reconstructed stream, plus a 16 hex
//!   character short id
//! - **Seal**: a detached text certificate binding a fingerprint and the
//!   container's metadata, checked later to detect tampering
//! - **Batch**: seal every container in a folder and write a CSV index
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use imgnum::{Imgnum, ImgnumConfig};
//!
//! let bench = Imgnum::new(ImgnumConfig::default());
//! bench.encode(Path::new("photo.png"), Path::new("photo.imgnum")).unwrap();
//! bench.seal(Path::new("photo.imgnum"), Path::new("photo.seal")).unwrap();
//!
//! let report = bench
//!     .check_seal(Path::new("photo.imgnum"), Path::new("photo.seal"))
//!     .unwrap();
//! assert!(report.is_match());
//! ```
//!
//! ## Re-exports
//!
//! - `imgnum::core` - Container codec, reconstruction, fingerprints, seals
//! - `imgnum::store` - Atomic file I/O, discovery, batch index

pub mod batch;
pub mod error;
pub mod raster;
pub mod report;
pub mod workbench;

// Re-export component crates
pub use imgnum_core as core;
pub use imgnum_store as store;

pub use error::{ImgnumError, Result};
pub use raster::PixelStream;
pub use report::{
    BatchItem, BatchSummary, ContainerInfo, DecimalReport, DecodeReport, EncodeReport,
    HashReport, SealOutcome, VerifyReport,
};
pub use workbench::{Imgnum, ImgnumConfig, DECIMAL_WARN_BYTES};

// Re-export commonly used core types
pub use imgnum_core::{
    Fingerprint, FormatError, Header, SealCertificate, SealFailure, SealReport, SealVerdict,
    Sha256Digest, ShortId,
};
