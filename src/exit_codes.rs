//! Exit code constants for the jtupdate CLI.
//!
//! - 0: Success
//! - 1: Configuration error (bad declarations, unknown group, no cores)
//! - 2: Environment error (JTROOT/CORES missing or inaccessible)
//! - 3: I/O failure while emitting workflow files
//! - 4: Template failure (compile or render)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: malformed declaration file, unknown group, empty core set.
pub const CONFIG_ERROR: i32 = 1;

/// Environment error: a required path is unset or cannot be accessed.
pub const ENVIRONMENT_ERROR: i32 = 2;

/// I/O failure: directory or file creation during workflow emission.
pub const IO_FAILURE: i32 = 3;

/// Template failure: the workflow template did not compile or render.
pub const TEMPLATE_FAILURE: i32 = 4;
