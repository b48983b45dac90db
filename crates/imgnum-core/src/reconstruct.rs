//! Restore the full pixel stream from a minimal payload.

use crate::error::{FormatError, Result};
use crate::header::{Header, MAX_TOTAL_BYTES};
use crate::integer::left_pad;

/// Rebuild the `total_bytes`-long stream by placing the payload at the tail
/// of a zero-filled buffer.
///
/// This is the exact inverse of the minimal-integer step performed when the
/// container was written. The omitted leading bytes are always zero.
pub fn reconstruct(header: &Header) -> Result<Vec<u8>> {
    if header.payload_len() > header.total_bytes {
        return Err(FormatError::PayloadExceedsTotal {
            payload: header.payload_len(),
            total: header.total_bytes,
        });
    }
    if header.total_bytes > MAX_TOTAL_BYTES {
        return Err(FormatError::TooLarge {
            total: header.total_bytes,
            max: MAX_TOTAL_BYTES,
        });
    }

    left_pad(&header.payload, header.total_bytes as usize).ok_or(
        FormatError::PayloadExceedsTotal {
            payload: header.payload_len(),
            total: header.total_bytes,
        },
    )
}
