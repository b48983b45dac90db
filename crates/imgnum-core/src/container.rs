//! Binary container codec.
//!
//! Layout (all multi-byte integers big-endian):
//!
//! ```text
//! offset 0   6 bytes   magic "IMGNUM"
//! offset 6   1 byte    version (1)
//! offset 7   1 byte    order (1 = row-major, top-left first)
//! offset 8   1 byte    channels (3)
//! offset 9   1 byte    reserved (0)
//! offset 10  4 bytes   width
//! offset 14  4 bytes   height
//! offset 18  8 bytes   totalBytes
//! offset 26  8 bytes   payloadLength
//! offset 34  payload
//! ```
//!
//! The container carries no checksum of its own. Integrity is checked on the
//! reconstructed stream by the fingerprint layer.

use bytes::Bytes;

use crate::be::{ByteReader, ByteWriter};
use crate::error::{FormatError, Result};
use crate::header::{
    expected_stream_len, Header, FORMAT_VERSION, HEADER_LEN, MAGIC, MAX_TOTAL_BYTES, RGB_CHANNELS,
};
use crate::integer::is_minimal;

/// Serialize a header and its payload to container bytes.
///
/// The whole container is produced in memory so callers can hand it to a
/// single write.
pub fn encode_container(header: &Header) -> Result<Vec<u8>> {
    if header.channels != RGB_CHANNELS {
        return Err(FormatError::UnsupportedChannels(header.channels));
    }
    let expected = expected_stream_len(header.width, header.height, header.channels)?;
    if header.total_bytes != expected {
        return Err(FormatError::StreamLength {
            expected,
            actual: header.total_bytes,
        });
    }
    if !is_minimal(&header.payload) {
        return Err(FormatError::NonMinimalPayload);
    }
    if header.payload_len() > header.total_bytes {
        return Err(FormatError::PayloadExceedsTotal {
            payload: header.payload_len(),
            total: header.total_bytes,
        });
    }

    let mut w = ByteWriter::with_capacity(HEADER_LEN + header.payload.len());
    w.put_bytes(&MAGIC); // 0..6
    w.put_u8(FORMAT_VERSION); // 6
    w.put_u8(header.order); // 7
    w.put_u8(header.channels); // 8
    w.put_u8(0); // 9 reserved
    w.put_u32(header.width); // 10..14
    w.put_u32(header.height); // 14..18
    w.put_u64(header.total_bytes); // 18..26
    w.put_u64(header.payload_len()); // 26..34
    debug_assert_eq!(w.len(), HEADER_LEN);
    w.put_bytes(&header.payload);

    Ok(w.into_inner())
}

/// Parse container bytes.
///
/// The payload is returned verbatim. Whether it fits inside `total_bytes` is
/// checked by [`crate::reconstruct`], not here. Bytes after the payload are
/// ignored.
pub fn decode_container(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let mut r = ByteReader::new(bytes);
    r.take(MAGIC.len())?;

    let version = r.read_u8()?;
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let order = r.read_u8()?;
    let channels = r.read_u8()?;
    let _reserved = r.read_u8()?;
    let width = r.read_u32()?;
    let height = r.read_u32()?;
    let total_bytes = r.read_u64()?;
    let payload_len = r.read_u64()?;

    if total_bytes > MAX_TOTAL_BYTES {
        return Err(FormatError::TooLarge {
            total: total_bytes,
            max: MAX_TOTAL_BYTES,
        });
    }

    let remaining = r.remaining() as u64;
    if payload_len > remaining {
        return Err(FormatError::PayloadLengthInvalid {
            declared: payload_len,
            remaining,
        });
    }
    let payload = r.take(payload_len as usize)?;

    Ok(Header {
        width,
        height,
        channels,
        order,
        total_bytes,
        payload: Bytes::copy_from_slice(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ORDER_ROW_MAJOR;

    fn sample() -> Header {
        Header::from_pixel_stream(2, 1, &[0, 0, 1, 2, 3, 4]).unwrap()
    }

    #[test]
    fn test_exact_layout() {
        let bytes = encode_container(&sample()).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"IMGNUM");
        expected.extend_from_slice(&[1, 1, 3, 0]);
        expected.extend_from_slice(&[0, 0, 0, 2]);
        expected.extend_from_slice(&[0, 0, 0, 1]);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 6]);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 4]);
        expected.extend_from_slice(&[1, 2, 3, 4]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_roundtrip() {
        let header = sample();
        let decoded = decode_container(&encode_container(&header).unwrap()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode_container(&sample()).unwrap();
        bytes[0] = b'X';
        assert_eq!(decode_container(&bytes), Err(FormatError::BadMagic));
        assert_eq!(decode_container(b"IMG"), Err(FormatError::BadMagic));
        assert_eq!(decode_container(b""), Err(FormatError::BadMagic));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = encode_container(&sample()).unwrap();
        bytes[6] = 2;
        assert_eq!(
            decode_container(&bytes),
            Err(FormatError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_truncated_header() {
        let bytes = encode_container(&sample()).unwrap();
        assert!(matches!(
            decode_container(&bytes[..20]),
            Err(FormatError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = encode_container(&sample()).unwrap();
        let err = decode_container(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            FormatError::PayloadLengthInvalid {
                declared: 4,
                remaining: 3
            }
        );
    }

    #[test]
    fn test_oversized_total_rejected() {
        let mut bytes = encode_container(&sample()).unwrap();
        bytes[18..26].copy_from_slice(&(MAX_TOTAL_BYTES + 1).to_be_bytes());
        assert!(matches!(
            decode_container(&bytes),
            Err(FormatError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_read_does_not_check_payload_against_total() {
        let mut bytes = encode_container(&sample()).unwrap();
        // Declare a total smaller than the payload; reading still succeeds.
        bytes[18..26].copy_from_slice(&2u64.to_be_bytes());
        let header = decode_container(&bytes).unwrap();
        assert_eq!(header.total_bytes, 2);
        assert_eq!(header.payload_len(), 4);
    }

    #[test]
    fn test_reserved_byte_ignored_and_trailing_bytes_ignored() {
        let mut bytes = encode_container(&sample()).unwrap();
        bytes[9] = 0xEE;
        bytes.extend_from_slice(&[9, 9, 9]);
        assert_eq!(decode_container(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_unknown_order_is_readable() {
        let mut bytes = encode_container(&sample()).unwrap();
        bytes[7] = 9;
        let header = decode_container(&bytes).unwrap();
        assert_eq!(header.order, 9);
        assert_ne!(header.order, ORDER_ROW_MAJOR);
    }

    #[test]
    fn test_write_preconditions() {
        let mut header = sample();
        header.payload = Bytes::from_static(&[0, 1]);
        assert_eq!(
            encode_container(&header),
            Err(FormatError::NonMinimalPayload)
        );

        let mut header = sample();
        header.channels = 4;
        assert_eq!(
            encode_container(&header),
            Err(FormatError::UnsupportedChannels(4))
        );

        let mut header = sample();
        header.width = 0;
        assert!(matches!(
            encode_container(&header),
            Err(FormatError::ZeroSize { .. })
        ));

        let mut header = sample();
        header.payload = Bytes::from_static(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            encode_container(&header),
            Err(FormatError::PayloadExceedsTotal {
                payload: 7,
                total: 6
            })
        );
    }
}
