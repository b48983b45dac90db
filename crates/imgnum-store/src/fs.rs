//! Reading and writing containers and seals by path.
//!
//! Every write is atomic from the caller's point of view: the full content is
//! produced in memory, written to a temporary file in the destination
//! directory, then renamed over the target. On any error the temporary file is
//! removed and the target is left untouched. New files get the same mode as
//! `fs::write` would give them (0666 minus the umask on unix).

use std::fs;
use std::io::Write;
use std::path::Path;

use imgnum_core::{decode_container, encode_container, Header, SealCertificate};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Read and decode a container file.
pub fn read_container(path: impl AsRef<Path>) -> Result<Header> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let header = decode_container(&bytes)?;
    debug!(
        path = %path.display(),
        width = header.width,
        height = header.height,
        total_bytes = header.total_bytes,
        payload_len = header.payload_len(),
        "read container"
    );
    Ok(header)
}

/// Encode and atomically write a container. Returns the bytes written.
pub fn write_container(path: impl AsRef<Path>, header: &Header) -> Result<u64> {
    let path = path.as_ref();
    let bytes = encode_container(header)?;
    atomic_write(path, &bytes)?;
    debug!(path = %path.display(), len = bytes.len(), "wrote container");
    Ok(bytes.len() as u64)
}

/// Read and parse a seal file.
pub fn read_seal(path: impl AsRef<Path>) -> Result<SealCertificate> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(SealCertificate::parse(&text)?)
}

/// Atomically write a seal file.
pub fn write_seal(path: impl AsRef<Path>, cert: &SealCertificate) -> Result<()> {
    let path = path.as_ref();
    atomic_write(path, cert.render().as_bytes())?;
    debug!(path = %path.display(), "wrote seal");
    Ok(())
}

/// Write `bytes` to `path` via a temporary sibling file and a rename.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = staging_file(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".imgnum-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // tempfile defaults to 0600; the umask still applies to this mode
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// The final path component as text, for `sourceImgnum=`.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
