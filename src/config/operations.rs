//! Config lookups and workflow policy loading.

use super::model::Config;
use super::types::WorkflowPolicy;
use crate::declarations::Declarations;
use crate::error::{Result, UpdateError};
use std::path::Path;

/// Composite key identifying a (target, core) pair.
pub fn make_key(target: &str, core: &str) -> String {
    format!("{}.{}", target, core)
}

impl Config {
    /// Whether this is a beta build (a beta unlock key was given).
    pub fn is_beta(&self) -> bool {
        !self.beta.is_empty()
    }

    /// Move the declaration file tables into the config.
    pub fn apply_declarations(&mut self, declarations: Declarations) {
        self.groups = declarations.groups;
        self.customs = declarations.customs;
    }

    /// Extra arguments declared for a (target, core) pair, empty if none.
    pub fn custom_args(&self, target: &str, core: &str) -> &str {
        self.customs
            .get(&make_key(target, core))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Enabled targets, in sorted order.
    pub fn enabled_targets(&self) -> impl Iterator<Item = &str> {
        self.targets
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }

    /// Resolve the cores to operate on.
    ///
    /// When a group selector is set, the group's core list replaces `cores`.
    /// An unknown group or an empty result is an error.
    pub fn working_cores(&self) -> Result<Vec<String>> {
        let cores: Vec<String> = if self.group.is_empty() {
            self.cores.clone()
        } else {
            let members = self.groups.get(&self.group).ok_or_else(|| {
                UpdateError::Config(format!(
                    "group '{}' cannot be found in the declaration file",
                    self.group
                ))
            })?;
            members.split(',').map(str::to_string).collect()
        };

        if cores.iter().all(|c| c.is_empty()) {
            return Err(UpdateError::Config("no cores specified".to_string()));
        }
        Ok(cores)
    }
}

impl WorkflowPolicy {
    /// Load a policy from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            UpdateError::Config(format!(
                "failed to read policy file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a policy from a YAML string. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let policy: WorkflowPolicy = serde_yaml::from_str(yaml)
            .map_err(|e| UpdateError::Config(format!("failed to parse policy YAML: {}", e)))?;

        policy.validate()?;
        Ok(policy)
    }

    /// Validation rules:
    /// - `reference_target` must be non-empty
    /// - `default_image` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.reference_target.trim().is_empty() {
            return Err(UpdateError::Config(
                "policy validation failed: reference_target must not be empty".to_string(),
            ));
        }
        if self.default_image.trim().is_empty() {
            return Err(UpdateError::Config(
                "policy validation failed: default_image must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Container image for a target.
    pub fn image_for(&self, target: &str) -> &str {
        self.target_images
            .get(target)
            .map(String::as_str)
            .unwrap_or(&self.default_image)
    }

    /// Whether workflow generation skips this target.
    pub fn is_not_ready(&self, target: &str) -> bool {
        self.not_ready_targets.iter().any(|t| t == target)
    }

    /// Whether the target's workflow runs on push at all.
    pub fn triggers_on_push(&self, target: &str) -> bool {
        !self.dispatch_only_targets.iter().any(|t| t == target)
    }

    /// Whether the target's push trigger carries a branch filter.
    pub fn filters_push_branches(&self, target: &str) -> bool {
        !self.unfiltered_push_targets.iter().any(|t| t == target)
    }

    /// Additional branch that triggers the target's build, if any.
    pub fn alternate_branch(&self, target: &str) -> &str {
        self.alternate_branches
            .get(target)
            .map(String::as_str)
            .unwrap_or("")
    }
}
