//! File collaborators: load a buffer, persist its bytes.

use crate::buffer::RowBuffer;
use crate::error::{EditorError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Read `path` into a fresh, clean buffer.
pub fn load(path: &Path) -> Result<RowBuffer> {
    let bytes = fs::read(path).map_err(|source| EditorError::FileLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = RowBuffer::from_bytes(&bytes);
    tracing::debug!(target: "file", path = %path.display(), bytes = bytes.len(), lines = rows.len(), "file_loaded");
    Ok(rows)
}

/// Write `bytes` to `path`, creating it if needed, and return the count.
///
/// The file is truncated to the new length before writing.
pub fn persist(path: &Path, bytes: &[u8]) -> io::Result<usize> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)?;
    file.flush()?;
    tracing::debug!(target: "file", path = %path.display(), bytes = bytes.len(), "file_saved");
    Ok(bytes.len())
}
