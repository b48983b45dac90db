//! The pixel stream viewed as one unsigned big-endian integer.
//!
//! Only two integer semantics are ever exercised by the container: dropping
//! leading zero bytes (the minimal encoding) and restoring them by padding on
//! the left. Neither needs arbitrary-precision arithmetic. The bignum crate is
//! used for base-10 rendering only.

use num_bigint::BigUint;

/// log10(2), for estimating decimal digit counts from a bit length.
const LOG10_2: f64 = 0.301_029_995_663_981_2;

/// Minimal big-endian encoding of the integer whose big-endian bytes are
/// `stream`: leading zero bytes removed, and a single `0x00` when the whole
/// stream is zero (or empty).
pub fn minimal_be_bytes(stream: &[u8]) -> Vec<u8> {
    match stream.iter().position(|&b| b != 0) {
        Some(first) => stream[first..].to_vec(),
        None => vec![0x00],
    }
}

/// Whether `payload` is already in minimal form.
pub fn is_minimal(payload: &[u8]) -> bool {
    match payload {
        [] => false,
        [0x00] => true,
        [first, ..] => *first != 0,
    }
}

/// Left-pad `payload` with zero bytes to exactly `len` bytes.
///
/// Returns `None` when the payload is longer than `len`.
pub fn left_pad(payload: &[u8], len: usize) -> Option<Vec<u8>> {
    let pad = len.checked_sub(payload.len())?;
    let mut full = vec![0u8; len];
    full[pad..].copy_from_slice(payload);
    Some(full)
}

/// Number of significant bits in a big-endian unsigned integer.
pub fn bit_length(be: &[u8]) -> u64 {
    match be.iter().position(|&b| b != 0) {
        Some(first) => {
            let significant = (be.len() - first - 1) as u64;
            significant * 8 + u64::from(8 - be[first].leading_zeros())
        }
        None => 0,
    }
}

/// Approximate count of decimal digits for an integer of `bit_length` bits.
pub fn approx_decimal_digits(bit_length: u64) -> u64 {
    if bit_length == 0 {
        return 1;
    }
    ((bit_length - 1) as f64 * LOG10_2).floor() as u64 + 1
}

/// Base-10 rendering of a big-endian unsigned integer.
pub fn to_decimal_string(be: &[u8]) -> String {
    BigUint::from_bytes_be(be).to_str_radix(10)
}
