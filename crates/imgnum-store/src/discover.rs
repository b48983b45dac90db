//! Finding container files under a folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// List files under `folder` whose extension equals `extension`
/// (case-insensitive, without the dot), sorted by path.
///
/// Subdirectories are descended only when `recursive` is set. Symlinked
/// directories are not followed.
pub fn discover_containers(folder: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(StoreError::NotADirectory(folder.to_path_buf()));
    }

    let mut found = Vec::new();
    let mut pending = vec![folder.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| StoreError::io(&path, e))?;

            if file_type.is_dir() {
                if recursive {
                    pending.push(path);
                }
            } else if has_extension(&path, extension) && path.is_file() {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// `path` relative to `base`, or the full path when it is not under `base`.
pub fn relative_display(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
