//! Lookup table aliases and the workflow policy carried by the config model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Group name to comma-joined core list, as declared in the declaration file.
pub type Groups = BTreeMap<String, String>;

/// Composite key (`target.core`) to the extra arguments for that pair.
pub type Customs = HashMap<String, String>;

/// Targets known to the build system, enabled together by `--all`.
pub const KNOWN_TARGETS: &[&str] = &[
    "mist",
    "mister",
    "sidi",
    "sidi128",
    "pocket",
    "neptuno",
    "mc2",
    "mcp",
    "sockit",
    "de1soc",
    "de10standard",
];

/// Target enabled when no target is requested explicitly.
pub const DEFAULT_TARGET: &str = "mist";

/// Target-specific carve-outs applied while synthesizing commands and workflows.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowPolicy {
    /// Target that keeps `--git` in beta builds.
    pub reference_target: String,

    /// Targets for which no workflow file is generated yet.
    pub not_ready_targets: Vec<String>,

    /// Container image used when a target has no entry in `target_images`.
    pub default_image: String,

    /// Per-target container image overrides.
    pub target_images: BTreeMap<String, String>,

    /// Owner prefix of the container images and registry login.
    pub image_owner: String,

    /// Extra push branch that also triggers a target's build.
    pub alternate_branches: BTreeMap<String, String>,

    /// Targets built on every push, with no branch filter.
    pub unfiltered_push_targets: Vec<String>,

    /// Targets built only on workflow or repository dispatch.
    pub dispatch_only_targets: Vec<String>,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            reference_target: default_reference_target(),
            not_ready_targets: default_not_ready_targets(),
            default_image: default_image(),
            target_images: default_target_images(),
            image_owner: default_image_owner(),
            alternate_branches: default_alternate_branches(),
            unfiltered_push_targets: vec!["mist".to_string()],
            dispatch_only_targets: vec!["mc2".to_string(), "neptuno".to_string()],
        }
    }
}

pub(crate) fn default_reference_target() -> String {
    "mister".to_string()
}
pub(crate) fn default_not_ready_targets() -> Vec<String> {
    ["mister", "sockit", "de1soc", "de10standard"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
pub(crate) fn default_image() -> String {
    "jtcore13".to_string()
}
pub(crate) fn default_image_owner() -> String {
    "jotego".to_string()
}
pub(crate) fn default_target_images() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("mister".to_string(), "jtcore:20".to_string()),
        ("pocket".to_string(), "jtcore:pocket".to_string()),
    ])
}
pub(crate) fn default_alternate_branches() -> BTreeMap<String, String> {
    BTreeMap::from([("mist".to_string(), "master".to_string())])
}
