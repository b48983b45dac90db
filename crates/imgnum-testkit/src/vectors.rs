//! Golden vectors: fixed pixel streams with their expected container bytes
//! and fingerprints.
//!
//! Any implementation of the container format must reproduce these exactly.

use imgnum_core::Header;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    /// Flattened RGB stream.
    pub stream: &'static [u8],
    /// Expected container file, hex.
    pub container_hex: &'static str,
    /// Expected SHA-256 of the stream, lowercase hex.
    pub sha256: &'static str,
    /// Expected short id.
    pub short_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "two pixels, three leading zeros",
            width: 2,
            height: 1,
            stream: &[0, 0, 0, 12, 34, 56],
            container_hex: "494d474e554d010103000000000200000001\
                            0000000000000006\
                            0000000000000003\
                            0c2238",
            sha256: "e7e02a9e9a0b0b2029c59f95b546c4477855ede49466a8097e9770a90cd1ed29",
            short_id: "E7E02A9E9A0B0B20",
        },
        GoldenVector {
            name: "all black 2x2",
            width: 2,
            height: 2,
            stream: &[0; 12],
            container_hex: "494d474e554d010103000000000200000002\
                            000000000000000c\
                            0000000000000001\
                            00",
            sha256: "15ec7bf0b50732b49f8228e07d24365338f9e3ab994b00af08e5a3bffe55fd8b",
            short_id: "15EC7BF0B50732B4",
        },
        GoldenVector {
            name: "single white pixel",
            width: 1,
            height: 1,
            stream: &[255, 255, 255],
            container_hex: "494d474e554d010103000000000100000001\
                            0000000000000003\
                            0000000000000003\
                            ffffff",
            sha256: "5ae7e6a42304dc6e4176210b83c43024f99a0bce9a870c3b6d2c95fc8ebfb74c",
            short_id: "5AE7E6A42304DC6E",
        },
        GoldenVector {
            name: "3x2 ramp starting at zero",
            width: 3,
            height: 2,
            stream: &[
                0, 15, 30, 45, 60, 75, 90, 105, 120, 135, 150, 165, 180, 195, 210, 225, 240, 255,
            ],
            container_hex: "494d474e554d010103000000000300000002\
                            0000000000000012\
                            0000000000000011\
                            0f1e2d3c4b5a69788796a5b4c3d2e1f0ff",
            sha256: "0affe270c463ad56861e127642db2474cc9cefb2bc4b998f15c302056d0ce2cb",
            short_id: "0AFFE270C463AD56",
        },
    ]
}

/// Header built from a vector's stream.
pub fn header_from_vector(vector: &GoldenVector) -> Header {
    match Header::from_pixel_stream(vector.width, vector.height, vector.stream) {
        Ok(header) => header,
        Err(e) => panic!("golden vector {:?} is invalid: {e}", vector.name),
    }
}
