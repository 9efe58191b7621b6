//! Filesystem helpers with integrity guarantees.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

/// Hex-encoded SHA-256 of a file's bytes, or `None` if it does not exist.
pub fn file_digest(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(hex::encode(Sha256::digest(&bytes))))
}

/// Copy `from` over `to` unless `to` already holds the same bytes.
///
/// Returns whether `to` was written.
pub fn copy_if_changed(from: &Path, to: &Path) -> Result<bool> {
    let source =
        file_digest(from)?.with_context(|| format!("{} does not exist", from.display()))?;
    if file_digest(to)?.as_deref() == Some(source.as_str()) {
        return Ok(false);
    }
    fs::copy(from, to)
        .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    Ok(true)
}

/// Replace `path` with `bytes` so readers only ever see the old or the new
/// content.
///
/// The data goes to a temporary file in the same directory, is synced, and
/// is then renamed over `path`. If anything fails before the rename the
/// original file is untouched and the temporary file is removed.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    write_then_replace(path, bytes, |tmp, path| {
        tmp.persist(path).map(drop).map_err(|e| e.error)
    })
}

fn write_then_replace<F>(path: &Path, bytes: &[u8], replace: F) -> Result<()>
where
    F: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create temporary file in {}", dir.display()))?;
    tmp.write_all(bytes).context("cannot write temporary file")?;
    tmp.as_file().sync_all().context("cannot sync temporary file")?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("cannot copy permissions of {}", path.display()))?;
    }

    replace(tmp, path).with_context(|| format!("cannot replace {}", path.display()))?;
    Ok(())
}
