//! Print build commands for a shell to run.

use super::write_line;
use crate::config::Config;
use crate::error::Result;
use crate::synth::synthesize_commands;
use std::io::Write;

/// Print every metadata and build command, one per line.
///
/// All lines are synthesized before the first one is written, so a
/// configuration error never leaves partial output behind.
pub(super) fn cmd_build(config: &Config, passthrough: &[String], out: &mut dyn Write) -> Result<()> {
    let lines = synthesize_commands(config, passthrough)?;
    for line in &lines {
        write_line(out, line)?;
    }
    tracing::debug!(count = lines.len(), "commands emitted");
    Ok(())
}
