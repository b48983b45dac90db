//! # imgnum core
//!
//! Pure primitives for imgnum: an RGB pixel stream read as one big-endian
//! unsigned integer, stored in a small binary container, and certified by
//! detached seal files.
//!
//! This crate contains no I/O. Reading and writing files lives in
//! `imgnum-store`; image decoding lives in `imgnum`.
//!
//! ## Key Types
//!
//! - [`Header`] - A decoded container: dimensions, lengths and payload
//! - [`Fingerprint`] - SHA-256 digest and 16-character short id of a stream
//! - [`SealCertificate`] - Parsed or freshly issued seal
//! - [`SealReport`] - Outcome of checking a seal against a container
//!
//! ## Round trip
//!
//! ```rust
//! use imgnum_core::{decode_container, encode_container, reconstruct, Header};
//!
//! let stream = [0u8, 0, 0, 12, 34, 56];
//! let header = Header::from_pixel_stream(2, 1, &stream).unwrap();
//! assert_eq!(header.payload.as_ref(), &[12, 34, 56]);
//!
//! let bytes = encode_container(&header).unwrap();
//! let decoded = decode_container(&bytes).unwrap();
//! assert_eq!(reconstruct(&decoded).unwrap(), stream.to_vec());
//! ```

pub mod be;
pub mod container;
pub mod error;
pub mod fingerprint;
pub mod header;
pub mod integer;
pub mod reconstruct;
pub mod seal;

pub use container::{decode_container, encode_container};
pub use error::{FormatError, Result};
pub use fingerprint::{fingerprint, Fingerprint, Sha256Digest, ShortId, SHORT_ID_HEX_LEN};
pub use header::{
    expected_stream_len, Header, PixelOrder, FORMAT_VERSION, HEADER_LEN, MAGIC, MAX_TOTAL_BYTES,
    ORDER_ROW_MAJOR, RGB_CHANNELS,
};
pub use reconstruct::reconstruct;
pub use seal::{
    check_seal, check_seal_text, Declared, MetadataField, MetadataMismatch, SealCertificate,
    SealFailure, SealReport, SealVerdict, SEAL_HEADER, SEAL_TAG,
};
