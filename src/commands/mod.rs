//! Command implementations for jtupdate.
//!
//! `dispatch` assembles the config model (CLI flags, build-tree cores and the
//! declaration file) and routes it to either the command printer or the
//! workflow emitter.

mod actions;
mod build;


use crate::cli::Cli;
use crate::config::Config;
use crate::context::BuildContext;
use crate::declarations::load_declarations;
use crate::error::{Result, UpdateError};
use crate::workflow::{RandomSeeds, SeedSource};
use std::io::{self, Write};

/// Run jtupdate for parsed arguments against the environment's build tree.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = BuildContext::resolve()?;
    let mut seeds = RandomSeeds::from_entropy();
    let stdout = io::stdout();
    run(&ctx, &cli, &mut stdout.lock(), &mut seeds)
}

/// Run against an explicit build tree, writing results to `out`.
pub fn run(
    ctx: &BuildContext,
    cli: &Cli,
    out: &mut dyn Write,
    seeds: &mut dyn SeedSource,
) -> Result<()> {
    let config = load_config(ctx, cli)?;

    if config.actions {
        actions::cmd_actions(ctx, &config, out, seeds)
    } else {
        build::cmd_build(&config, &cli.passthrough, out)
    }
}

/// Assemble the final, read-only config model.
fn load_config(ctx: &BuildContext, cli: &Cli) -> Result<Config> {
    let mut config = cli.to_config()?;
    config.cores = ctx.select_cores(&cli.cores)?;

    if let Some(declarations) = load_declarations(ctx.declaration_path())? {
        config.apply_declarations(declarations);
    }

    tracing::debug!(
        cores = config.cores.len(),
        targets = config.enabled_targets().count(),
        groups = config.groups.len(),
        max_jobs = config.max_jobs,
        "configuration resolved"
    );
    Ok(config)
}

fn write_line(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{}", line)
        .map_err(|e| UpdateError::Io(format!("failed to write output: {}", e)))
}
