//! # imgnum store
//!
//! Filesystem layer for imgnum. Containers and seals are read whole and
//! written atomically; batch runs discover containers under a folder and
//! record one CSV row per file.
//!
//! ## Key Items
//!
//! - [`read_container`] / [`write_container`] - Container files by path
//! - [`read_seal`] / [`write_seal`] - Seal files by path
//! - [`discover_containers`] - Sorted container discovery, optionally recursive
//! - [`IndexWriter`] - Incremental batch index
//!
//! ## Design Notes
//!
//! - **Atomic writes**: output is staged in a temporary sibling file and
//!   renamed over the target, so a failed write never leaves a partial file
//! - **Scoped handles**: every file handle is closed before the call returns,
//!   including on error paths

pub mod discover;
pub mod error;
pub mod fs;
pub mod index;

pub use discover::{discover_containers, relative_display};
pub use error::{Result, StoreError};
pub use fs::{atomic_write, file_name_of, read_container, read_seal, write_container, write_seal};
pub use index::{csv_field, default_index_path, IndexRow, IndexWriter, ERROR_MARKER, INDEX_COLUMNS};
