//! The batch index: one CSV row per discovered container.
//!
//! ```text
//! file,id,sha256,width,height,totalBytes,seal
//! a.imgnum,0123456789ABCDEF,<hex>,640,480,921600,a.imgnum.seal
//! junk.imgnum,,ERROR,,,,bad magic
//! ```
//!
//! A failed row keeps the same seven columns: the digest column carries the
//! error marker, the numeric columns are empty and the message takes the last
//! column.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Header row of every index.
pub const INDEX_COLUMNS: &str = "file,id,sha256,width,height,totalBytes,seal";

/// Placed in the `sha256` column of a failed row.
pub const ERROR_MARKER: &str = "ERROR";

/// One index row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexRow {
    Sealed {
        file: String,
        short_id: String,
        sha256: String,
        width: u32,
        height: u32,
        total_bytes: u64,
        seal: String,
    },
    Failed {
        file: String,
        message: String,
    },
}

impl IndexRow {
    /// Render without the trailing newline.
    pub fn to_csv_line(&self) -> String {
        match self {
            Self::Sealed {
                file,
                short_id,
                sha256,
                width,
                height,
                total_bytes,
                seal,
            } => format!(
                "{},{},{},{},{},{},{}",
                csv_field(file),
                csv_field(short_id),
                csv_field(sha256),
                width,
                height,
                total_bytes,
                csv_field(seal)
            ),
            Self::Failed { file, message } => {
                let message = message.replace(['\r', '\n'], " ");
                format!(
                    "{},,{},,,,{}",
                    csv_field(file),
                    ERROR_MARKER,
                    csv_field(&message)
                )
            }
        }
    }
}

/// Quote a field when it contains a comma, quote or line break; quotes
/// inside are doubled.
pub fn csv_field(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

/// Incremental index writer. Rows are written in the order they are
/// recorded.
pub struct IndexWriter<W: Write> {
    out: W,
    rows: usize,
}

impl IndexWriter<BufWriter<File>> {
    /// Create (or truncate) the index file at `path` and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        Self::new(BufWriter::new(file)).map_err(|e| StoreError::io(path, e))
    }
}

impl<W: Write> IndexWriter<W> {
    /// Wrap a writer and emit the header row.
    pub fn new(mut out: W) -> std::io::Result<Self> {
        writeln!(out, "{}", INDEX_COLUMNS)?;
        Ok(Self { out, rows: 0 })
    }

    pub fn record(&mut self, row: &IndexRow) -> std::io::Result<()> {
        writeln!(self.out, "{}", row.to_csv_line())?;
        self.rows += 1;
        Ok(())
    }

    /// Rows recorded so far (excluding the header).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Default index location for a batch over `folder`.
pub fn default_index_path(folder: &Path, file_name: &str) -> PathBuf {
    folder.join(file_name)
}
