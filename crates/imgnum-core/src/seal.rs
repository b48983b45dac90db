//! Seal certificates: detached text records binding a fingerprint to the
//! metadata of one container.
//!
//! ```text
//! IMGNUM_SEAL_V1
//! tag=FRANKENSTEIN_JUNKPILE_FRAGMENT
//! createdUtc=2026-01-14T12:00:00.000000Z
//! shortId=0123456789ABCDEF
//! sha256=<64 lowercase hex>
//! width=..
//! height=..
//! channels=3
//! order=1
//! totalBytes=..
//! sourceImgnum=<file name>
//! ```
//!
//! A seal is a snapshot. It is never rewritten, only compared against values
//! recomputed from a container.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{FormatError, Result};
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::header::Header;
use crate::reconstruct::reconstruct;

/// First line of every seal.
pub const SEAL_HEADER: &str = "IMGNUM_SEAL_V1";

/// Provenance tag written into every seal.
pub const SEAL_TAG: &str = "FRANKENSTEIN_JUNKPILE_FRAGMENT";

/// Stored digests shorter than this are rejected as malformed.
pub const MIN_DIGEST_HEX_LEN: usize = 10;

mod keys {
    pub const TAG: &str = "tag";
    pub const CREATED_UTC: &str = "createdUtc";
    pub const SHORT_ID: &str = "shortId";
    pub const SHA256: &str = "sha256";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const CHANNELS: &str = "channels";
    pub const ORDER: &str = "order";
    pub const TOTAL_BYTES: &str = "totalBytes";
    pub const SOURCE: &str = "sourceImgnum";

    pub const ALL: [&str; 10] = [
        TAG,
        CREATED_UTC,
        SHORT_ID,
        SHA256,
        WIDTH,
        HEIGHT,
        CHANNELS,
        ORDER,
        TOTAL_BYTES,
        SOURCE,
    ];
}

/// A metadata value as declared by a seal.
///
/// Absence never constrains. A value that is present but does not parse
/// still constrains, and never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declared<T> {
    Absent,
    Value(T),
    Unparsable(String),
}

impl<T: FromStr + PartialEq> Declared<T> {
    fn from_raw(raw: Option<String>) -> Self {
        match raw {
            None => Self::Absent,
            Some(s) => match s.parse::<T>() {
                Ok(v) => Self::Value(v),
                Err(_) => Self::Unparsable(s),
            },
        }
    }

    /// Whether `actual` satisfies this declaration.
    pub fn admits(&self, actual: &T) -> bool {
        match self {
            Self::Absent => true,
            Self::Value(v) => v == actual,
            Self::Unparsable(_) => false,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<T: fmt::Display> Declared<T> {
    fn raw(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Value(v) => Some(v.to_string()),
            Self::Unparsable(s) => Some(s.clone()),
        }
    }
}

/// The container metadata fields a seal may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataField {
    Width,
    Height,
    Channels,
    Order,
    TotalBytes,
}

impl MetadataField {
    pub fn key(self) -> &'static str {
        match self {
            Self::Width => keys::WIDTH,
            Self::Height => keys::HEIGHT,
            Self::Channels => keys::CHANNELS,
            Self::Order => keys::ORDER,
            Self::TotalBytes => keys::TOTAL_BYTES,
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A parsed (or freshly issued) seal certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealCertificate {
    pub tag: Option<String>,
    /// Informational only; never validated.
    pub created_utc: Option<String>,
    pub short_id: Option<String>,
    /// Stored digest, as written (hex, any case).
    pub sha256: String,
    pub width: Declared<u32>,
    pub height: Declared<u32>,
    pub channels: Declared<u8>,
    pub order: Declared<u8>,
    pub total_bytes: Declared<u64>,
    pub source_name: Option<String>,
    /// Keys this version does not interpret, kept verbatim.
    pub extra: BTreeMap<String, String>,
}

impl SealCertificate {
    /// Issue a certificate for a container whose stream has `fp`.
    pub fn issue(
        header: &Header,
        fp: &Fingerprint,
        source_name: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tag: Some(SEAL_TAG.to_string()),
            created_utc: Some(created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
            short_id: Some(fp.short_id.to_string()),
            sha256: fp.digest.to_hex(),
            width: Declared::Value(header.width),
            height: Declared::Value(header.height),
            channels: Declared::Value(header.channels),
            order: Declared::Value(header.order),
            total_bytes: Declared::Value(header.total_bytes),
            source_name: Some(source_name.to_string()),
            extra: BTreeMap::new(),
        }
    }

    /// Render as seal text (one `key=value` per line, trailing newline).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(384);
        out.push_str(SEAL_HEADER);
        out.push('\n');

        let mut line = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                out.push_str(key);
                out.push('=');
                out.push_str(&value);
                out.push('\n');
            }
        };

        line(keys::TAG, self.tag.clone());
        line(keys::CREATED_UTC, self.created_utc.clone());
        line(keys::SHORT_ID, self.short_id.clone());
        line(keys::SHA256, Some(self.sha256.clone()));
        line(keys::WIDTH, self.width.raw());
        line(keys::HEIGHT, self.height.raw());
        line(keys::CHANNELS, self.channels.raw());
        line(keys::ORDER, self.order.raw());
        line(keys::TOTAL_BYTES, self.total_bytes.raw());
        line(keys::SOURCE, self.source_name.clone());
        for (key, value) in &self.extra {
            line(key, Some(value.clone()));
        }
        out
    }

    /// Parse seal text.
    ///
    /// The first line must be [`SEAL_HEADER`]. Blank lines, `#` comments and
    /// lines without a key are skipped. Keys are case-insensitive and a later
    /// duplicate overrides an earlier one.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let first = lines
            .next()
            .ok_or_else(|| FormatError::MalformedSeal("empty seal file".into()))?;
        // A UTF-8 byte order mark is not part of the header line.
        let first = first.trim_start_matches('\u{feff}').trim();
        if first != SEAL_HEADER {
            return Err(FormatError::MalformedSeal(
                "unknown header/version".into(),
            ));
        }

        let mut known: BTreeMap<&'static str, String> = BTreeMap::new();
        let mut extra = BTreeMap::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let value = value.trim().to_string();
            match keys::ALL.iter().find(|k| k.eq_ignore_ascii_case(key)) {
                Some(k) => {
                    known.insert(*k, value);
                }
                None => {
                    extra.insert(key.to_string(), value);
                }
            }
        }

        let sha256 = match known.remove(keys::SHA256) {
            Some(s) if s.len() >= MIN_DIGEST_HEX_LEN => s,
            _ => return Err(FormatError::MalformedSeal("missing sha256".into())),
        };

        Ok(Self {
            tag: known.remove(keys::TAG),
            created_utc: known.remove(keys::CREATED_UTC),
            short_id: known.remove(keys::SHORT_ID).filter(|s| !s.is_empty()),
            sha256,
            width: Declared::from_raw(known.remove(keys::WIDTH)),
            height: Declared::from_raw(known.remove(keys::HEIGHT)),
            channels: Declared::from_raw(known.remove(keys::CHANNELS)),
            order: Declared::from_raw(known.remove(keys::ORDER)),
            total_bytes: Declared::from_raw(known.remove(keys::TOTAL_BYTES)),
            source_name: known.remove(keys::SOURCE),
            extra,
        })
    }

    /// Declared metadata fields that disagree with `header`.
    pub fn metadata_mismatches(&self, header: &Header) -> Vec<MetadataMismatch> {
        let mut out = Vec::new();
        let mut check = |field, ok: bool, declared: Option<String>, actual: String| {
            if !ok {
                out.push(MetadataMismatch {
                    field,
                    declared: declared.unwrap_or_default(),
                    actual,
                });
            }
        };

        check(
            MetadataField::Width,
            self.width.admits(&header.width),
            self.width.raw(),
            header.width.to_string(),
        );
        check(
            MetadataField::Height,
            self.height.admits(&header.height),
            self.height.raw(),
            header.height.to_string(),
        );
        check(
            MetadataField::Channels,
            self.channels.admits(&header.channels),
            self.channels.raw(),
            header.channels.to_string(),
        );
        check(
            MetadataField::Order,
            self.order.admits(&header.order),
            self.order.raw(),
            header.order.to_string(),
        );
        check(
            MetadataField::TotalBytes,
            self.total_bytes.admits(&header.total_bytes),
            self.total_bytes.raw(),
            header.total_bytes.to_string(),
        );
        out
    }
}

impl FromStr for SealCertificate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One declared metadata value that did not match the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataMismatch {
    pub field: MetadataField,
    pub declared: String,
    pub actual: String,
}

/// Which property of a seal failed to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SealFailure {
    DigestMismatch,
    MetadataMismatch,
    ShortIdMismatch,
}

impl fmt::Display for SealFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigestMismatch => f.write_str("digest mismatch"),
            Self::MetadataMismatch => f.write_str("metadata mismatch"),
            Self::ShortIdMismatch => f.write_str("short-id mismatch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SealVerdict {
    Match,
    NoMatch,
}

/// Outcome of checking a seal against a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealReport {
    pub expected_short_id: Option<String>,
    pub expected_sha256: String,
    pub actual: Fingerprint,
    pub digest_match: bool,
    pub short_id_match: bool,
    pub metadata_mismatches: Vec<MetadataMismatch>,
}

impl SealReport {
    pub fn verdict(&self) -> SealVerdict {
        if self.failures().is_empty() {
            SealVerdict::Match
        } else {
            SealVerdict::NoMatch
        }
    }

    pub fn is_match(&self) -> bool {
        self.verdict() == SealVerdict::Match
    }

    pub fn metadata_match(&self) -> bool {
        self.metadata_mismatches.is_empty()
    }

    /// Every property that failed, in a fixed order.
    pub fn failures(&self) -> Vec<SealFailure> {
        let mut out = Vec::new();
        if !self.digest_match {
            out.push(SealFailure::DigestMismatch);
        }
        if !self.metadata_match() {
            out.push(SealFailure::MetadataMismatch);
        }
        if !self.short_id_match {
            out.push(SealFailure::ShortIdMismatch);
        }
        out
    }
}

/// Check a certificate against a container.
///
/// The stream is reconstructed and fingerprinted in full before any
/// comparison is made.
pub fn check_seal(cert: &SealCertificate, header: &Header) -> Result<SealReport> {
    let stream = reconstruct(header)?;
    let actual = fingerprint(&stream);
    Ok(compare(cert, header, actual))
}

/// Parse seal text, then check it against a container.
pub fn check_seal_text(text: &str, header: &Header) -> Result<SealReport> {
    check_seal(&SealCertificate::parse(text)?, header)
}

/// Compare a certificate with an already computed fingerprint.
pub fn compare(cert: &SealCertificate, header: &Header, actual: Fingerprint) -> SealReport {
    let digest_match = actual.digest.matches_hex(&cert.sha256);
    let short_id_match = cert
        .short_id
        .as_deref()
        .map_or(true, |declared| actual.short_id.matches(declared));

    SealReport {
        expected_short_id: cert.short_id.clone(),
        expected_sha256: cert.sha256.clone(),
        metadata_mismatches: cert.metadata_mismatches(header),
        actual,
        digest_match,
        short_id_match,
    }
}
