//! Atomic file writes for generated workflow files.
//!
//! Content is written to `.{filename}.tmp` next to the target, synced, then
//! renamed over the target. A half-written workflow file is never visible to
//! the CI host. On crash, the temporary file may remain.

use crate::error::{Result, UpdateError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to `path`, creating missing parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        super::ensure_dir(parent)?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    // rename() replaces the destination if it exists
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        UpdateError::Io(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| UpdateError::Io(format!("invalid file path '{}'", target.display())))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        UpdateError::Io(format!("failed to create '{}': {}", path.display(), e))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            UpdateError::Io(format!("failed to write '{}': {}", path.display(), e))
        })
}
