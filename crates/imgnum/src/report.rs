//! Result records returned by [`Imgnum`](crate::Imgnum) operations.
//!
//! Reports are plain data. Mismatches are reported here as values with a
//! verdict; they are never errors.

use std::path::PathBuf;

use imgnum_core::Fingerprint;
use serde::Serialize;

/// Written by `encode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub total_bytes: u64,
    pub payload_bytes: u64,
}

/// Written by `decode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Written by `decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub payload_bytes: u64,
    pub digits: u64,
}

/// Everything `info` knows about a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    pub file: PathBuf,
    pub version: u8,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub order: u8,
    pub order_text: String,
    pub total_bytes: u64,
    pub payload_bytes: u64,
    pub bit_length: u64,
    /// Approximate decimal digit count of the payload integer.
    pub approx_digits: u64,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashReport {
    pub file: PathBuf,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
}

/// Outcome of comparing a container with an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VerifyReport {
    /// Dimensions differ; the image was not hashed.
    DimensionMismatch {
        container: (u32, u32),
        image: (u32, u32),
    },
    Compared {
        matched: bool,
        container: Fingerprint,
        image: Fingerprint,
    },
}

impl VerifyReport {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Compared { matched: true, .. })
    }
}

/// Written by `seal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealOutcome {
    pub container: PathBuf,
    pub seal: PathBuf,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
}

/// One container's fate in a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchItem {
    Sealed {
        file: PathBuf,
        seal: PathBuf,
        fingerprint: Fingerprint,
        width: u32,
        height: u32,
        total_bytes: u64,
    },
    Failed {
        file: PathBuf,
        message: String,
    },
}

/// Counts and locations from a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub folder: PathBuf,
    pub recursive: bool,
    pub index: PathBuf,
    pub found: usize,
    pub sealed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn all_sealed(&self) -> bool {
        self.failed == 0
    }
}
