//! Write CI workflow files.

use super::write_line;
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::Result;
use crate::workflow::{SECRETS_REMINDER, SeedSource, emit_workflows};
use std::io::Write;

/// Emit the workflow files under the build-tree root, then print the
/// secrets reminder.
pub(super) fn cmd_actions(
    ctx: &BuildContext,
    config: &Config,
    out: &mut dyn Write,
    seeds: &mut dyn SeedSource,
) -> Result<()> {
    let written = emit_workflows(&ctx.root, config, seeds)?;
    tracing::info!(
        count = written.len(),
        folder = %ctx.workflow_dir().display(),
        "workflows written"
    );
    write_line(out, SECRETS_REMINDER)
}
