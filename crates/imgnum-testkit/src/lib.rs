//! # imgnum testkit
//!
//! Testing utilities for imgnum.
//!
//! - **Golden vectors**: fixed pixel streams with their exact container bytes
//!   and fingerprints
//! - **Generators**: proptest strategies for streams and headers
//! - **Fixtures**: a scratch folder that writes containers, images and seals
//!
//! ```rust
//! use imgnum_testkit::vectors::{all_vectors, header_from_vector};
//!
//! for vector in all_vectors() {
//!     let header = header_from_vector(&vector);
//!     assert_eq!(header.total_bytes, vector.stream.len() as u64);
//! }
//! ```
//!
//! ```rust
//! use imgnum_testkit::TestFixture;
//!
//! let fx = TestFixture::new();
//! let container = fx.write_container("frame.imgnum", 4, 4);
//! assert!(container.exists());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_time, ramp_header, ramp_image, TestFixture};
