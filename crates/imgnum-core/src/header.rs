//! The decoded container: header fields plus the minimal integer payload.

use std::fmt;

use bytes::Bytes;

use crate::error::{FormatError, Result};
use crate::integer::minimal_be_bytes;

/// Six-byte tag at offset 0 of every container.
pub const MAGIC: [u8; 6] = *b"IMGNUM";

/// The single supported container version.
pub const FORMAT_VERSION: u8 = 1;

/// Pixel order: row-major, top-left to bottom-right.
pub const ORDER_ROW_MAJOR: u8 = 1;

/// RGB, 8 bits per channel. Alpha is never stored.
pub const RGB_CHANNELS: u8 = 3;

/// Fixed header length; the payload starts at this offset.
pub const HEADER_LEN: usize = 34;

/// Largest pixel stream a container may declare (a signed 32-bit count).
pub const MAX_TOTAL_BYTES: u64 = i32::MAX as u64;

/// Known pixel traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelOrder {
    /// y = 0..height, x = 0..width.
    RowMajorTopLeft = ORDER_ROW_MAJOR,
}

impl PixelOrder {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            ORDER_ROW_MAJOR => Some(Self::RowMajorTopLeft),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PixelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowMajorTopLeft => write!(f, "Top-left -> bottom-right (row-major)"),
        }
    }
}

/// A container as read from (or about to be written to) disk.
///
/// `order` and `channels` are kept as raw bytes so that a container with an
/// unknown order can still be inspected and hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub order: u8,
    /// Length of the full, unpadded pixel stream.
    pub total_bytes: u64,
    /// Leading-zero-stripped big-endian payload.
    pub payload: Bytes,
}

impl Header {
    /// Build a header from a flattened RGB stream (row-major, 3 bytes per
    /// pixel). The payload is the minimal big-endian form of the stream.
    pub fn from_pixel_stream(width: u32, height: u32, stream: &[u8]) -> Result<Self> {
        let total_bytes = expected_stream_len(width, height, RGB_CHANNELS)?;
        if stream.len() as u64 != total_bytes {
            return Err(FormatError::StreamLength {
                expected: total_bytes,
                actual: stream.len() as u64,
            });
        }

        Ok(Self {
            width,
            height,
            channels: RGB_CHANNELS,
            order: ORDER_ROW_MAJOR,
            total_bytes,
            payload: Bytes::from(minimal_be_bytes(stream)),
        })
    }

    pub fn payload_len(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn pixel_order(&self) -> Option<PixelOrder> {
        PixelOrder::from_u8(self.order)
    }

    /// Human-readable order, `Unknown (n)` for unrecognised values.
    pub fn order_description(&self) -> String {
        match self.pixel_order() {
            Some(order) => order.to_string(),
            None => format!("Unknown ({})", self.order),
        }
    }

    /// Reject containers this build cannot turn back into pixels.
    pub fn ensure_rgb_row_major(&self) -> Result<()> {
        if self.channels != RGB_CHANNELS {
            return Err(FormatError::UnsupportedChannels(self.channels));
        }
        if self.pixel_order().is_none() {
            return Err(FormatError::UnsupportedOrder(self.order));
        }
        Ok(())
    }
}

/// `width * height * channels`, checked against zero size and
/// [`MAX_TOTAL_BYTES`].
pub fn expected_stream_len(width: u32, height: u32, channels: u8) -> Result<u64> {
    if width == 0 || height == 0 {
        return Err(FormatError::ZeroSize { width, height });
    }
    // u32 * u32 * u8 always fits in u128.
    let total = u128::from(width) * u128::from(height) * u128::from(channels);
    if total > u128::from(MAX_TOTAL_BYTES) {
        return Err(FormatError::TooLarge {
            total: u64::try_from(total).unwrap_or(u64::MAX),
            max: MAX_TOTAL_BYTES,
        });
    }
    Ok(total as u64)
}
