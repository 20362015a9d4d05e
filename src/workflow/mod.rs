//! CI workflow synthesis.
//!
//! One GitHub Actions workflow is rendered per enabled (target, core) pair,
//! or five per pair for seeded builds. Rendering happens in two passes:
//!
//! 1. **Render**: the compiled [`Template`] substitutes the pair's context.
//! 2. **Restore**: [`restore_host_delimiters`] turns the `¿¿ … ??`
//!    placeholders back into GitHub's own `{{ … }}` expressions.
//!
//! Files land in `$JTROOT/.github/workflows/<target>_<core>[_<n>].yml`.

mod escape;
mod seed;
mod template;


pub use escape::restore_host_delimiters;
pub use seed::{RandomSeeds, SeedSource, seed_flag};
pub use template::{Template, vars};

use crate::config::Config;
use crate::error::{Result, UpdateError};
use crate::fs::{atomic_write_file, ensure_dir};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Workflow document template.
pub const WORKFLOW_TEMPLATE: &str = include_str!("ci.yml.tpl");

/// Number of seeded variants rendered per (target, core) pair.
pub const SEED_VARIANTS: usize = 5;

/// Printed once all workflows have been written.
pub const SECRETS_REMINDER: &str = "Remember to add the secrets to the GitHub repository";

/// Directory holding the workflow files under the build-tree root.
pub fn workflow_dir(root: &Path) -> PathBuf {
    root.join(".github").join("workflows")
}

/// File name for a workflow: `<target>_<core>[_<index>].yml`.
pub fn workflow_file_name(target: &str, core: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{}_{}_{}.yml", target, core, i),
        None => format!("{}_{}.yml", target, core),
    }
}

/// A rendered workflow document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWorkflow {
    pub file_name: String,
    pub content: String,
}

/// Renders workflow documents for a configuration.
pub struct WorkflowSynthesizer<'a> {
    config: &'a Config,
    template: Template,
}

impl<'a> WorkflowSynthesizer<'a> {
    /// Compile the built-in workflow template.
    pub fn new(config: &'a Config) -> Result<Self> {
        Self::with_template(config, WORKFLOW_TEMPLATE)
    }

    /// Compile a custom template source.
    pub fn with_template(config: &'a Config, source: &str) -> Result<Self> {
        let template =
            Template::compile(source).map_err(|e| UpdateError::Template(e.to_string()))?;
        Ok(Self { config, template })
    }

    /// Targets that get workflow files: enabled and not excluded by policy.
    pub fn targets(&self) -> Vec<&'a str> {
        let config = self.config;
        config
            .enabled_targets()
            .filter(|t| !config.policy.is_not_ready(t))
            .collect()
    }

    /// Render context for one pair.
    pub fn context(&self, target: &str, core: &str, seed: &str) -> HashMap<String, String> {
        let policy = &self.config.policy;
        vars([
            ("corename", core),
            ("target", target),
            ("image", policy.image_for(target)),
            ("image_owner", policy.image_owner.as_str()),
            ("extra", self.config.custom_args(target, core)),
            ("seed", seed),
            ("other_branch", policy.alternate_branch(target)),
            ("push", flag(policy.triggers_on_push(target))),
            ("branches", flag(policy.filters_push_branches(target))),
        ])
    }

    /// Render all documents for one pair.
    pub fn render_pair(
        &self,
        target: &str,
        core: &str,
        seeds: &mut dyn SeedSource,
    ) -> Result<Vec<RenderedWorkflow>> {
        if !self.config.seed {
            return Ok(vec![RenderedWorkflow {
                file_name: workflow_file_name(target, core, None),
                content: self.render_one(target, core, "")?,
            }]);
        }

        (0..SEED_VARIANTS)
            .map(|index| -> Result<RenderedWorkflow> {
                let seed = seed_flag(seeds.next_seed());
                Ok(RenderedWorkflow {
                    file_name: workflow_file_name(target, core, Some(index)),
                    content: self.render_one(target, core, &seed)?,
                })
            })
            .collect()
    }

    /// Render documents for every selected target and core.
    pub fn render_all(&self, seeds: &mut dyn SeedSource) -> Result<Vec<RenderedWorkflow>> {
        let cores = self.config.working_cores()?;
        let mut rendered = Vec::new();
        for target in self.targets() {
            for core in &cores {
                rendered.extend(self.render_pair(target, core, seeds)?);
            }
        }
        Ok(rendered)
    }

    fn render_one(&self, target: &str, core: &str, seed: &str) -> Result<String> {
        let rendered = self
            .template
            .render(&self.context(target, core, seed))
            .map_err(|e| UpdateError::Template(e.to_string()))?;
        Ok(restore_host_delimiters(&rendered))
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "" }
}

/// Render and write every workflow file under `root`.
///
/// Returns the paths written, in generation order.
pub fn emit_workflows(
    root: &Path,
    config: &Config,
    seeds: &mut dyn SeedSource,
) -> Result<Vec<PathBuf>> {
    let folder = workflow_dir(root);
    ensure_dir(&folder)?;

    let synth = WorkflowSynthesizer::new(config)?;
    let mut written = Vec::new();
    for workflow in synth.render_all(seeds)? {
        let path = folder.join(&workflow.file_name);
        atomic_write_file(&path, &workflow.content)?;
        tracing::debug!(path = %path.display(), "wrote workflow");
        written.push(path);
    }
    Ok(written)
}
