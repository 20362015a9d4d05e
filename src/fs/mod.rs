//! Filesystem utilities for jtupdate.
//!
//! Directory creation and atomic writes for generated files.

pub mod atomic;

pub use atomic::atomic_write_file;

use crate::error::{Result, UpdateError};
use std::path::Path;

/// Create `path` and all of its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        UpdateError::Io(format!(
            "problem creating folder '{}': {}",
            path.display(),
            e
        ))
    })
}
