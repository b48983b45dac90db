//! SHA-256 fingerprints of reconstructed pixel streams.
//!
//! The short id is the first 16 hex characters of the digest in uppercase: a
//! 64-bit prefix meant for people comparing files, not a security boundary.
//! Digest equality is always decided on the full 32 bytes in constant time.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// Hex characters in a short id.
pub const SHORT_ID_HEX_LEN: usize = 16;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, Hash)]
pub struct Sha256Digest(pub [u8; 32]);

impl Sha256Digest {
    /// Compute the SHA-256 of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex, either case.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Constant-time equality over all 32 bytes.
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }

    /// Compare against a hex string (case-insensitive). Anything that is not
    /// 64 hex characters never matches.
    pub fn matches_hex(&self, s: &str) -> bool {
        match Self::from_hex(s.trim()) {
            Ok(other) => self.ct_eq(&other),
            Err(_) => false,
        }
    }

    pub fn short_id(&self) -> ShortId {
        ShortId(self.to_hex()[..SHORT_ID_HEX_LEN].to_ascii_uppercase())
    }
}

impl PartialEq for Sha256Digest {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for Sha256Digest {}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Sha256Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl From<[u8; 32]> for Sha256Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// 16 uppercase hex characters identifying a pixel stream.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortId(String);

impl ShortId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison with a declared id.
    pub fn matches(&self, declared: &str) -> bool {
        self.0.eq_ignore_ascii_case(declared.trim())
    }
}

impl fmt::Debug for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortId({})", self.0)
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest plus short id of one reconstructed stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    #[serde(rename = "id")]
    pub short_id: ShortId,
    #[serde(rename = "sha256")]
    pub digest: Sha256Digest,
}

impl Fingerprint {
    pub fn of(stream: &[u8]) -> Self {
        let digest = Sha256Digest::hash(stream);
        Self {
            short_id: digest.short_id(),
            digest,
        }
    }
}

/// Fingerprint a full reconstructed stream.
pub fn fingerprint(stream: &[u8]) -> Fingerprint {
    Fingerprint::of(stream)
}
