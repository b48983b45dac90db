//! Test fixtures and helpers.
//!
//! A scratch folder that knows how to fill itself with containers, images,
//! seals and junk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use image::{Rgb, RgbImage};
use imgnum_core::{fingerprint, reconstruct, Header, SealCertificate};
use imgnum_store::{write_container, write_seal};
use tempfile::TempDir;

/// Fixed creation time for seals issued by fixtures.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Deterministic test image: a colour ramp with a black top-left corner.
pub fn ramp_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if x == 0 && y == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([
                (x * 37 % 256) as u8,
                (y * 53 % 256) as u8,
                ((x + y) * 11 % 256) as u8,
            ])
        }
    })
}

/// Header for [`ramp_image`].
pub fn ramp_header(width: u32, height: u32) -> Header {
    let image = ramp_image(width, height);
    Header::from_pixel_stream(width, height, image.as_raw())
        .expect("ramp image has a valid stream")
}

/// A temporary directory that is removed when dropped.
pub struct TestFixture {
    dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the fixture, creating parent folders.
    pub fn join(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture folder");
        }
        path
    }

    /// Save a [`ramp_image`] as an image file (format from the extension).
    pub fn write_image(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.join(name);
        ramp_image(width, height).save(&path).expect("save image");
        path
    }

    /// Write a container of a [`ramp_image`].
    pub fn write_container(&self, name: &str, width: u32, height: u32) -> PathBuf {
        self.write_header(name, &ramp_header(width, height))
    }

    pub fn write_header(&self, name: &str, header: &Header) -> PathBuf {
        let path = self.join(name);
        write_container(&path, header).expect("write container");
        path
    }

    /// Write a file with the container extension that is not a container.
    pub fn write_junk(&self, name: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, b"NOTANIMGNUM, just junk\n").expect("write junk");
        path
    }

    /// Issue a seal for the container at `container` and write it to `name`.
    pub fn write_seal_for(&self, container: &Path, name: &str) -> PathBuf {
        let header = imgnum_store::read_container(container).expect("read container");
        let stream = reconstruct(&header).expect("reconstruct");
        let source = container
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let cert = SealCertificate::issue(&header, &fingerprint(&stream), &source, fixed_time());

        let path = self.join(name);
        write_seal(&path, &cert).expect("write seal");
        path
    }

    /// Write arbitrary seal text.
    pub fn write_text(&self, name: &str, text: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, text).expect("write text");
        path
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_has_leading_zeros() {
        let header = ramp_header(4, 3);
        assert_eq!(header.total_bytes, 36);
        assert!(header.payload_len() < header.total_bytes);
    }

    #[test]
    fn test_fixture_files_live_in_the_fixture() {
        let fx = TestFixture::new();
        let container = fx.write_container("nested/a.imgnum", 2, 2);
        let seal = fx.write_seal_for(&container, "nested/a.imgnum.seal");
        assert!(container.starts_with(fx.path()));
        assert!(seal.exists());
    }
}
