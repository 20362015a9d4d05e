//! Declaration file support for jtupdate.
//!
//! The declaration file (`$JTROOT/.jtupdate`) is a line-oriented list of
//! core groups and per-(target, core) custom arguments:
//!
//! ```text
//! # cores built together
//! [arcade]
//! cps1
//! cps2
//!
//! [custom: mist|sidi]
//! cps2 -d JTFRAME_SDRAM_BANKS
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A bracket line opens a
//! group (`[name]`) or a keyword block (`[custom: targets]`); every other line
//! belongs to the most recently opened block.

mod parser;


pub use parser::{Declarations, parse_declarations};

use crate::error::{Result, UpdateError};
use std::path::Path;

/// Name of the declaration file inside the build-tree root.
pub const DECLARATION_FILE: &str = ".jtupdate";

/// Load and parse the declaration file at `path`.
///
/// A missing file is not an error: it yields `Ok(None)`.
pub fn load_declarations<P: AsRef<Path>>(path: P) -> Result<Option<Declarations>> {
    let path = path.as_ref();
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no declaration file");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        UpdateError::Config(format!(
            "failed to read declaration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DECLARATION_FILE.to_string());

    parse_declarations(&name, &content).map(Some)
}
