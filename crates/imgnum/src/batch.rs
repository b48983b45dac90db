//! Batch sealing: seal every container under a folder and index the results.
//!
//! Files are processed one at a time in sorted discovery order. A file that
//! cannot be read, reconstructed or sealed is recorded as a failed index row
//! and the run moves on; only failures of the run itself (missing folder,
//! unwritable index) abort it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use imgnum_core::{fingerprint, reconstruct, SealCertificate};
use imgnum_store::{
    default_index_path, discover_containers, file_name_of, read_container, relative_display,
    write_seal, IndexRow, IndexWriter, StoreError,
};
use tracing::{debug, info, warn};

use crate::error::{ImgnumError, Result};
use crate::report::{BatchItem, BatchSummary};
use crate::workbench::ImgnumConfig;

/// `<container><suffix>`, e.g. `frame.imgnum.seal`.
pub fn seal_path_for(container: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(container.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

pub(crate) fn run(
    config: &ImgnumConfig,
    folder: &Path,
    recursive: bool,
    index: Option<&Path>,
    created_at: DateTime<Utc>,
) -> Result<BatchSummary> {
    let index_path = match index {
        Some(path) => path.to_path_buf(),
        None => default_index_path(folder, &config.index_file_name),
    };

    // Fails on a missing folder before the index file is created.
    let files = discover_containers(folder, &config.container_extension, recursive)?;
    info!(
        folder = %folder.display(),
        recursive,
        found = files.len(),
        "batch seal started"
    );

    let mut writer = IndexWriter::create(&index_path)?;
    let io_err = |e: std::io::Error| ImgnumError::Store(StoreError::Io {
        path: index_path.clone(),
        source: e,
    });

    let (mut sealed, mut failed) = (0, 0);
    for file in &files {
        let item = seal_one(config, file, created_at);
        let row = match &item {
            BatchItem::Sealed {
                seal,
                fingerprint,
                width,
                height,
                total_bytes,
                ..
            } => {
                sealed += 1;
                debug!(path = %file.display(), id = %fingerprint.short_id, "sealed");
                IndexRow::Sealed {
                    file: relative_display(folder, file),
                    short_id: fingerprint.short_id.to_string(),
                    sha256: fingerprint.digest.to_hex(),
                    width: *width,
                    height: *height,
                    total_bytes: *total_bytes,
                    seal: relative_display(folder, seal),
                }
            }
            BatchItem::Failed { message, .. } => {
                failed += 1;
                warn!(path = %file.display(), error = %message, "batch item failed");
                IndexRow::Failed {
                    file: relative_display(folder, file),
                    message: message.clone(),
                }
            }
        };
        writer.record(&row).map_err(io_err)?;
    }
    writer.finish().map_err(io_err)?;

    let summary = BatchSummary {
        folder: folder.to_path_buf(),
        recursive,
        index: index_path.clone(),
        found: files.len(),
        sealed,
        failed,
    };
    info!(
        index = %index_path.display(),
        sealed = summary.sealed,
        failed = summary.failed,
        "batch seal finished"
    );
    Ok(summary)
}

/// Read, reconstruct, fingerprint and seal one container.
fn seal_one(config: &ImgnumConfig, file: &Path, created_at: DateTime<Utc>) -> BatchItem {
    match try_seal_one(config, file, created_at) {
        Ok(item) => item,
        Err(e) => BatchItem::Failed {
            file: file.to_path_buf(),
            message: e.to_string(),
        },
    }
}

fn try_seal_one(config: &ImgnumConfig, file: &Path, created_at: DateTime<Utc>) -> Result<BatchItem> {
    let header = read_container(file)?;
    let fp = fingerprint(&reconstruct(&header)?);
    let seal = seal_path_for(file, &config.seal_suffix);
    let cert = SealCertificate::issue(&header, &fp, &file_name_of(file), created_at);
    write_seal(&seal, &cert)?;
    Ok(BatchItem::Sealed {
        file: file.to_path_buf(),
        seal,
        fingerprint: fp,
        width: header.width,
        height: header.height,
        total_bytes: header.total_bytes,
    })
}
