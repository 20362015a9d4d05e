//! jtupdate: resolve core/target build declarations into build commands or
//! CI workflow files.
//!
//! This is the main entry point for the `jtupdate` CLI. It parses arguments,
//! runs the update, and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod declarations;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod synth;
pub mod workflow;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries the generated commands
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
