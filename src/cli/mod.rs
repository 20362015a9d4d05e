//! CLI argument parsing for jtupdate.
//!
//! Uses clap derive macros for declarative argument definitions. Conversion
//! into the [`Config`] model happens here; the run itself lives in the
//! `commands` module.

use crate::config::{Config, DEFAULT_TARGET, KNOWN_TARGETS, WorkflowPolicy};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// jtupdate: generate core build commands or CI workflow files.
///
/// Prints one shell command per line for every enabled target and selected
/// core. With `--actions`, writes GitHub workflow files under
/// `$JTROOT/.github/workflows` instead.
///
/// Arguments after `--` are appended verbatim to every build command.
#[derive(Parser, Debug)]
#[command(name = "jtupdate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cores to update (comma separated). Defaults to every core found in $CORES.
    #[arg(long, value_delimiter = ',')]
    pub cores: Vec<String>,

    /// Only process the cores of this group from the .jtupdate file.
    #[arg(short, long, default_value = "")]
    pub group: String,

    /// Targets to build for (comma separated or repeated). Defaults to mist.
    #[arg(short, long = "target", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Enable every known target.
    #[arg(long)]
    pub all: bool,

    /// Add the generated files to git.
    #[arg(long)]
    pub git: bool,

    /// Remove the HDMI debug output (MiSTer).
    #[arg(long)]
    pub nohdmi: bool,

    /// Remove sound.
    #[arg(long)]
    pub nosnd: bool,

    /// Private build.
    #[arg(long)]
    pub private: bool,

    /// Release build without debug features.
    #[arg(long)]
    pub nodbg: bool,

    /// Only update ROM/metadata files, skip the build commands.
    #[arg(long)]
    pub skip: bool,

    /// Skip ROM regeneration during the metadata update.
    #[arg(long = "skipROM")]
    pub skip_rom: bool,

    /// Seeded builds.
    #[arg(long)]
    pub seed: bool,

    /// Generate GitHub workflow files instead of shell commands.
    #[arg(long)]
    pub actions: bool,

    /// Beta build, unlocked with this key.
    #[arg(long, default_value = "")]
    pub beta: String,

    /// Core stamp passed to the build tool.
    #[arg(long, default_value = "")]
    pub stamp: String,

    /// Extra macro definitions (comma separated).
    #[arg(short, long, default_value = "")]
    pub defs: String,

    /// Extra arguments added to every build command.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub extra: String,

    /// Maximum number of parallel jobs.
    #[arg(short = 'j', long = "jobs", default_value_t = 0)]
    pub max_jobs: u32,

    /// YAML file overriding the target-specific workflow policy.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Arguments appended verbatim to every build command.
    #[arg(last = true)]
    pub passthrough: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the initial config model. Cores and declarations are added later.
    pub fn to_config(&self) -> Result<Config> {
        let policy = match &self.policy {
            Some(path) => WorkflowPolicy::load(path)?,
            None => WorkflowPolicy::default(),
        };

        let mut config = Config {
            max_jobs: self.max_jobs,
            git: self.git,
            no_hdmi: self.nohdmi,
            no_sound: self.nosnd,
            private: self.private,
            no_debug: self.nodbg,
            skip_build: self.skip,
            skip_rom: self.skip_rom,
            seed: self.seed,
            actions: self.actions,
            beta: self.beta.clone(),
            stamp: self.stamp.clone(),
            defs: self.defs.clone(),
            group: self.group.clone(),
            extra: self.extra.clone(),
            policy,
            ..Config::default()
        };

        if self.all {
            for target in KNOWN_TARGETS {
                config.targets.insert(target.to_string(), true);
            }
        }
        for target in self.targets.iter().filter(|t| !t.is_empty()) {
            config.targets.insert(target.clone(), true);
        }
        if config.targets.is_empty() {
            config.targets.insert(DEFAULT_TARGET.to_string(), true);
        }
        Ok(config)
    }
}
