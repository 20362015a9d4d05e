//! Config struct definition.

use super::types::{Customs, Groups, WorkflowPolicy};
use std::collections::BTreeMap;

/// Resolved settings for one jtupdate run.
///
/// Built by the CLI and environment layers, augmented once with the
/// declaration file tables, and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Config {
    // =========================================================================
    // Build options
    // =========================================================================
    /// Maximum parallel jobs (informational, not emitted).
    pub max_jobs: u32,

    /// Track generated files in git.
    pub git: bool,

    /// Strip the HDMI debug output.
    pub no_hdmi: bool,

    /// Strip sound.
    pub no_sound: bool,

    /// Private build: distinct OSD color, release mode.
    pub private: bool,

    /// Disable debug features (release mode).
    pub no_debug: bool,

    /// Only refresh ROM/metadata files, do not emit build commands.
    pub skip_build: bool,

    /// Skip the ROM regeneration step of the metadata refresh.
    pub skip_rom: bool,

    /// Seeded builds (`jtseed` / randomized workflow variants).
    pub seed: bool,

    /// Generate CI workflow files instead of shell commands.
    pub actions: bool,

    /// Beta unlock key; empty when this is not a beta build.
    pub beta: String,

    /// Core stamp passed through to the build tool.
    pub stamp: String,

    /// Comma-separated extra macro definitions.
    pub defs: String,

    /// Group selector; empty to use `cores` directly.
    pub group: String,

    /// Global extra arguments appended to every build command.
    pub extra: String,

    // =========================================================================
    // Selection
    // =========================================================================
    /// Cores to process, in output order.
    pub cores: Vec<String>,

    /// Target name to enabled flag. Disabled targets are kept but skipped.
    pub targets: BTreeMap<String, bool>,

    // =========================================================================
    // Declaration tables
    // =========================================================================
    /// Groups declared in the declaration file.
    pub groups: Groups,

    /// Per-(target, core) extra arguments declared in the declaration file.
    pub customs: Customs,

    /// Target-specific workflow and beta policy.
    pub policy: WorkflowPolicy,
}
