//! Big-endian fixed-width integer codec over byte cursors.
//!
//! All multi-byte integers in the container are big-endian. Reads never
//! panic: running out of input is reported as [`FormatError::TruncatedHeader`]
//! with the total number of bytes that would have been required.

use crate::error::{FormatError, Result};

/// A read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(FormatError::TruncatedHeader {
                need: self.pos + n,
                have: self.buf.len(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Take exactly `N` bytes into an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    /// Everything after the cursor, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

/// Append-only big-endian writer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_is_big_endian() {
        let mut w = ByteWriter::default();
        w.put_u32(0x0102_0304);
        assert_eq!(w.into_inner(), vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_u64_is_big_endian() {
        let mut w = ByteWriter::default();
        w.put_u64(0x0102_0304_0506_0708);
        assert_eq!(
            w.into_inner(),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn test_reader_sequence() {
        let bytes = [0xAA, 0x00, 0x00, 0x01, 0x00, 0, 0, 0, 0, 0, 0, 0, 0x2A, 0xFF];
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 0xAA);
        assert_eq!(r.read_u32().unwrap(), 256);
        assert_eq!(r.read_u64().unwrap(), 42);
        assert_eq!(r.position(), 13);
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.rest(), &[0xFF]);
    }

    #[test]
    fn test_reader_truncation_reports_needed_length() {
        let bytes = [0u8; 3];
        let mut r = ByteReader::new(&bytes);
        let err = r.read_u32().unwrap_err();
        assert_eq!(err, FormatError::TruncatedHeader { need: 4, have: 3 });
        // A failed read does not advance.
        assert_eq!(r.position(), 0);
    }
}
