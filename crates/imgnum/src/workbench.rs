//! The workbench: one method per imgnum operation.
//!
//! Every operation is synchronous and self-contained. Files opened by an
//! operation are closed before it returns, and single-file outputs are
//! written atomically through the store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use imgnum_core::integer::{approx_decimal_digits, bit_length, to_decimal_string};
use imgnum_core::{
    check_seal, fingerprint, reconstruct, Header, SealCertificate, SealReport, FORMAT_VERSION,
};
use imgnum_store::{
    atomic_write, file_name_of, read_container, read_seal, write_container, write_seal,
};
use tracing::{debug, info, warn};

use crate::error::{ImgnumError, Result};
use crate::raster::{load_pixels, save_pixels, PixelStream};
use crate::report::{
    BatchSummary, ContainerInfo, DecimalReport, DecodeReport, EncodeReport, HashReport,
    SealOutcome, VerifyReport,
};

/// Payloads above this size get a warning before decimal export.
pub const DECIMAL_WARN_BYTES: u64 = 1 << 20;

/// Configuration for the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgnumConfig {
    /// Extension (without the dot) that batch discovery looks for.
    pub container_extension: String,
    /// Appended to a container path to name its batch seal.
    pub seal_suffix: String,
    /// Index file name used when a batch run is given no index path.
    pub index_file_name: String,
    /// Refuse decimal export of payloads larger than this many bytes.
    pub decimal_limit: Option<u64>,
}

impl Default for ImgnumConfig {
    fn default() -> Self {
        Self {
            container_extension: "imgnum".to_string(),
            seal_suffix: ".seal".to_string(),
            index_file_name: "imgnum_index.csv".to_string(),
            decimal_limit: None,
        }
    }
}

/// Entry point for all imgnum operations.
#[derive(Debug, Clone, Default)]
pub struct Imgnum {
    config: ImgnumConfig,
}

impl Imgnum {
    pub fn new(config: ImgnumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImgnumConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// Read an image, flatten it to RGB and store it as a container.
    pub fn encode(&self, image: &Path, output: &Path) -> Result<EncodeReport> {
        let pixels = load_pixels(image)?;
        let header = Header::from_pixel_stream(pixels.width, pixels.height, &pixels.bytes)?;
        write_container(output, &header)?;

        info!(
            input = %image.display(),
            output = %output.display(),
            total_bytes = header.total_bytes,
            payload_len = header.payload_len(),
            "encoded"
        );
        Ok(EncodeReport {
            input: image.to_path_buf(),
            output: output.to_path_buf(),
            width: header.width,
            height: header.height,
            total_bytes: header.total_bytes,
            payload_bytes: header.payload_len(),
        })
    }

    /// Restore the pixels of a container and write them as an image whose
    /// format follows the output extension.
    pub fn decode(&self, container: &Path, output: &Path) -> Result<DecodeReport> {
        let header = read_container(container)?;
        header.ensure_rgb_row_major()?;
        let bytes = reconstruct(&header)?;

        save_pixels(
            output,
            PixelStream {
                width: header.width,
                height: header.height,
                bytes,
            },
        )?;

        info!(input = %container.display(), output = %output.display(), "decoded");
        Ok(DecodeReport {
            input: container.to_path_buf(),
            output: output.to_path_buf(),
            width: header.width,
            height: header.height,
        })
    }

    /// Write the payload integer in base 10.
    ///
    /// The text is about 2.4 characters per payload byte and is built in
    /// memory. Set [`ImgnumConfig::decimal_limit`] to refuse large payloads.
    pub fn decimal(&self, container: &Path, output: &Path) -> Result<DecimalReport> {
        let header = read_container(container)?;
        let payload_len = header.payload_len();

        if let Some(limit) = self.config.decimal_limit {
            if payload_len > limit {
                return Err(ImgnumError::DecimalTooLarge { payload_len, limit });
            }
        }
        if payload_len > DECIMAL_WARN_BYTES {
            warn!(
                path = %container.display(),
                payload_len,
                "decimal export of a large payload; output may be gigantic"
            );
        }

        let text = to_decimal_string(&header.payload);
        atomic_write(output, text.as_bytes())?;

        info!(output = %output.display(), digits = text.len(), "wrote decimal integer");
        Ok(DecimalReport {
            input: container.to_path_buf(),
            output: output.to_path_buf(),
            payload_bytes: payload_len,
            digits: text.len() as u64,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn info(&self, container: &Path) -> Result<ContainerInfo> {
        let header = read_container(container)?;
        let bits = bit_length(&header.payload);
        let fp = fingerprint(&reconstruct(&header)?);

        Ok(ContainerInfo {
            file: container.to_path_buf(),
            version: FORMAT_VERSION,
            width: header.width,
            height: header.height,
            channels: header.channels,
            order: header.order,
            order_text: header.order_description(),
            total_bytes: header.total_bytes,
            payload_bytes: header.payload_len(),
            bit_length: bits,
            approx_digits: approx_decimal_digits(bits),
            fingerprint: fp,
        })
    }

    pub fn hash(&self, container: &Path) -> Result<HashReport> {
        let header = read_container(container)?;
        let fp = fingerprint(&reconstruct(&header)?);
        debug!(path = %container.display(), id = %fp.short_id, "hashed");
        Ok(HashReport {
            file: container.to_path_buf(),
            fingerprint: fp,
        })
    }

    /// Compare a container against an image file.
    ///
    /// Differing dimensions short-circuit without hashing the image.
    /// Otherwise both streams are hashed in full and the digests compared in
    /// constant time.
    pub fn verify(&self, container: &Path, image: &Path) -> Result<VerifyReport> {
        let header = read_container(container)?;
        header.ensure_rgb_row_major()?;
        let from_container = fingerprint(&reconstruct(&header)?);

        let pixels = load_pixels(image)?;
        if (pixels.width, pixels.height) != (header.width, header.height) {
            debug!(
                container = %container.display(),
                image = %image.display(),
                "dimension mismatch"
            );
            return Ok(VerifyReport::DimensionMismatch {
                container: (header.width, header.height),
                image: (pixels.width, pixels.height),
            });
        }

        let from_image = fingerprint(&pixels.bytes);
        let matched = from_container.digest.ct_eq(&from_image.digest);
        Ok(VerifyReport::Compared {
            matched,
            container: from_container,
            image: from_image,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seals
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a seal for a container, timestamped now.
    pub fn seal(&self, container: &Path, seal: &Path) -> Result<SealOutcome> {
        self.seal_at(container, seal, Utc::now())
    }

    /// Issue a seal with an explicit creation time.
    pub fn seal_at(
        &self,
        container: &Path,
        seal: &Path,
        created_at: DateTime<Utc>,
    ) -> Result<SealOutcome> {
        let header = read_container(container)?;
        let fp = fingerprint(&reconstruct(&header)?);
        let cert = SealCertificate::issue(&header, &fp, &file_name_of(container), created_at);
        write_seal(seal, &cert)?;

        info!(seal = %seal.display(), id = %fp.short_id, "sealed");
        Ok(SealOutcome {
            container: container.to_path_buf(),
            seal: seal.to_path_buf(),
            fingerprint: fp,
        })
    }

    /// Check a seal file against a container.
    pub fn check_seal(&self, container: &Path, seal: &Path) -> Result<SealReport> {
        let cert = read_seal(seal)?;
        let header = read_container(container)?;
        let report = check_seal(&cert, &header)?;
        debug!(
            container = %container.display(),
            seal = %seal.display(),
            verdict = ?report.verdict(),
            "checked seal"
        );
        Ok(report)
    }

    /// Seal every container under `folder`. See [`crate::batch`].
    pub fn batch_seal(
        &self,
        folder: &Path,
        recursive: bool,
        index: Option<&Path>,
    ) -> Result<BatchSummary> {
        crate::batch::run(&self.config, folder, recursive, index, Utc::now())
    }

    /// Path of the seal a batch run writes for `container`.
    pub fn batch_seal_path(&self, container: &Path) -> PathBuf {
        crate::batch::seal_path_for(container, &self.config.seal_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgnum_core::{FormatError, SealFailure};
    use imgnum_store::StoreError;

    fn write_frame(dir: &Path, name: &str, stream: &[u8], w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        write_container(&path, &Header::from_pixel_stream(w, h, stream).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = ImgnumConfig::default();
        assert_eq!(config.container_extension, "imgnum");
        assert_eq!(config.seal_suffix, ".seal");
        assert_eq!(config.index_file_name, "imgnum_index.csv");
        assert_eq!(config.decimal_limit, None);
    }

    #[test]
    fn test_info_of_small_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_frame(dir.path(), "a.imgnum", &[0, 0, 0, 0, 1, 0], 2, 1);

        let info = Imgnum::default().info(&path).unwrap();
        assert_eq!(info.payload_bytes, 2);
        assert_eq!(info.bit_length, 9);
        assert_eq!(info.approx_digits, 3);
        assert_eq!(info.order_text, "Top-left -> bottom-right (row-major)");
        assert_eq!(info.fingerprint, fingerprint(&[0, 0, 0, 0, 1, 0]));
    }

    #[test]
    fn test_decimal_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_frame(dir.path(), "a.imgnum", &[0, 0, 0, 0, 1, 0], 2, 1);
        let out = dir.path().join("n.txt");

        let report = Imgnum::default().decimal(&path, &out).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "256");
        assert_eq!(report.digits, 3);
    }

    #[test]
    fn test_decimal_of_black_image_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_frame(dir.path(), "a.imgnum", &[0; 12], 2, 2);
        let out = dir.path().join("n.txt");

        Imgnum::default().decimal(&path, &out).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "0");
    }

    #[test]
    fn test_decimal_limit_refuses_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_frame(dir.path(), "a.imgnum", &[9, 9, 9, 9, 9, 9], 2, 1);
        let out = dir.path().join("n.txt");

        let bench = Imgnum::new(ImgnumConfig {
            decimal_limit: Some(4),
            ..ImgnumConfig::default()
        });
        assert!(matches!(
            bench.decimal(&path, &out),
            Err(ImgnumError::DecimalTooLarge {
                payload_len: 6,
                limit: 4
            })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_seal_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_frame(dir.path(), "a.imgnum", &[1, 2, 3, 4, 5, 6], 2, 1);
        let seal = dir.path().join("a.seal");
        let bench = Imgnum::default();

        let outcome = bench.seal(&path, &seal).unwrap();
        let report = bench.check_seal(&path, &seal).unwrap();
        assert!(report.is_match());
        assert_eq!(report.actual, outcome.fingerprint);

        let cert = read_seal(&seal).unwrap();
        assert_eq!(cert.source_name.as_deref(), Some("a.imgnum"));
    }

    #[test]
    fn test_check_seal_against_other_container() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_frame(dir.path(), "a.imgnum", &[1, 2, 3, 4, 5, 6], 2, 1);
        let b = write_frame(dir.path(), "b.imgnum", &[1, 2, 3, 4, 5, 7], 2, 1);
        let seal = dir.path().join("a.seal");
        let bench = Imgnum::default();

        bench.seal(&a, &seal).unwrap();
        let report = bench.check_seal(&b, &seal).unwrap();
        assert!(!report.is_match());
        assert_eq!(
            report.failures(),
            vec![SealFailure::DigestMismatch, SealFailure::ShortIdMismatch]
        );
    }

    #[test]
    fn test_decode_refuses_unknown_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.imgnum");
        let mut header = Header::from_pixel_stream(1, 1, &[1, 2, 3]).unwrap();
        header.order = 7;
        write_container(&path, &header).unwrap();

        let err = Imgnum::default()
            .decode(&path, &dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(
            err,
            ImgnumError::Format(FormatError::UnsupportedOrder(7))
        ));
    }

    #[test]
    fn test_info_of_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Imgnum::default()
            .info(&dir.path().join("missing.imgnum"))
            .unwrap_err();
        assert!(matches!(err, ImgnumError::Store(StoreError::Io { .. })));
    }
}
