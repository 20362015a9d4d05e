//! Build-tree context resolution for jtupdate.
//!
//! Finds the build-tree root (`$JTROOT`) and the cores folder (`$CORES`),
//! and decides which cores to operate on when none are given explicitly.

use crate::declarations::DECLARATION_FILE;
use crate::error::{Result, UpdateError};
use crate::workflow::workflow_dir;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the build-tree root.
pub const ROOT_VAR: &str = "JTROOT";

/// Environment variable holding the cores folder.
pub const CORES_VAR: &str = "CORES";

/// Folder a core must contain to be selectable.
pub const CORE_MARKER: &str = "cfg";

/// Folder used to discover cores when none contain [`CORE_MARKER`].
pub const FALLBACK_CORE_MARKER: &str = "hdl";

/// Resolved paths for one run. All paths are verified directories.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Build-tree root (`$JTROOT`).
    pub root: PathBuf,

    /// Folder holding one sub-folder per core (`$CORES`).
    pub cores_dir: PathBuf,
}

impl BuildContext {
    /// Resolve the context from `JTROOT` and `CORES`.
    pub fn resolve() -> Result<Self> {
        let root = require_var(ROOT_VAR)?;
        let cores_dir = require_var(CORES_VAR)?;
        Self::resolve_from(root, cores_dir)
    }

    /// Resolve the context from explicit paths.
    pub fn resolve_from<P: AsRef<Path>, Q: AsRef<Path>>(root: P, cores_dir: Q) -> Result<Self> {
        let root = root.as_ref();
        let cores_dir = cores_dir.as_ref();
        require_folder(root)?;
        require_folder(cores_dir)?;

        Ok(Self {
            root: root.to_path_buf(),
            cores_dir: cores_dir.to_path_buf(),
        })
    }

    /// Path of the declaration file (`$JTROOT/.jtupdate`).
    pub fn declaration_path(&self) -> PathBuf {
        self.root.join(DECLARATION_FILE)
    }

    /// Folder receiving generated workflow files.
    pub fn workflow_dir(&self) -> PathBuf {
        workflow_dir(&self.root)
    }

    /// Decide which cores to process.
    ///
    /// Explicitly requested cores must each have a `cfg` folder. Without a
    /// request, every core folder with `cfg` is selected, falling back to
    /// folders with `hdl`. Finding no core at all is an error.
    pub fn select_cores(&self, requested: &[String]) -> Result<Vec<String>> {
        let requested: Vec<&String> = requested.iter().filter(|c| !c.is_empty()).collect();
        if !requested.is_empty() {
            return requested
                .into_iter()
                .map(|core| -> Result<String> {
                    require_folder(&self.cores_dir.join(core).join(CORE_MARKER))?;
                    Ok(core.clone())
                })
                .collect();
        }

        let mut cores = self.discover_cores(CORE_MARKER)?;
        if cores.is_empty() {
            cores = self.discover_cores(FALLBACK_CORE_MARKER)?;
        }
        if cores.is_empty() {
            return Err(UpdateError::Config("no cores specified".to_string()));
        }
        tracing::debug!(count = cores.len(), "discovered cores");
        Ok(cores)
    }

    /// Sorted names of the core folders containing `marker`.
    fn discover_cores(&self, marker: &str) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.cores_dir).map_err(|e| {
            UpdateError::Environment(format!(
                "failed to read cores folder '{}': {}",
                self.cores_dir.display(),
                e
            ))
        })?;

        let mut cores = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                UpdateError::Environment(format!("failed to read directory entry: {}", e))
            })?;
            if entry.path().join(marker).is_dir()
                && let Some(name) = entry.file_name().to_str()
            {
                cores.push(name.to_string());
            }
        }
        cores.sort();
        Ok(cores)
    }
}

fn require_var(name: &str) -> Result<PathBuf> {
    match env::var_os(name) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(UpdateError::Environment(format!("{} is not defined", name))),
    }
}

fn require_folder(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(UpdateError::Environment(format!(
            "cannot access path {}",
            path.display()
        )))
    }
}
