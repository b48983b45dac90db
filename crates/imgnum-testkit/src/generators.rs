//! Proptest generators for property-based testing.

use proptest::prelude::*;

use imgnum_core::Header;

/// Image dimensions up to `max` on each side.
pub fn dimensions(max: u32) -> impl Strategy<Value = (u32, u32)> {
    (1..=max, 1..=max)
}

/// Dimensions plus a matching RGB stream. A random-length run of zero bytes
/// is placed at the front so the minimal encoding has something to strip.
pub fn pixel_stream(max_side: u32) -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    (dimensions(max_side), any::<prop::sample::Index>()).prop_flat_map(|((w, h), zeros)| {
        let len = (w * h * 3) as usize;
        let zeros = zeros.index(len + 1);
        prop::collection::vec(any::<u8>(), len - zeros).prop_map(move |tail| {
            let mut stream = vec![0u8; zeros];
            stream.extend(tail);
            (w, h, stream)
        })
    })
}

/// A stream that is all zero bytes.
pub fn black_stream(max_side: u32) -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    dimensions(max_side).prop_map(|(w, h)| (w, h, vec![0u8; (w * h * 3) as usize]))
}

/// A valid header built from [`pixel_stream`].
pub fn header(max_side: u32) -> impl Strategy<Value = Header> {
    pixel_stream(max_side).prop_map(|(w, h, stream)| {
        Header::from_pixel_stream(w, h, &stream).expect("generated stream matches dimensions")
    })
}

/// Seal metadata keys in random letter case.
pub fn key_case(key: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), key.len()).prop_map(move |upper| {
        key.chars()
            .zip(upper)
            .map(|(c, up)| {
                if up {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}
