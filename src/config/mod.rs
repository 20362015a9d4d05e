//! Configuration model for jtupdate.
//!
//! The `Config` struct holds the build options, the target/core selection and
//! the tables read from the declaration file. `WorkflowPolicy` carries the
//! target-specific carve-outs and can be overridden from a YAML file.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::make_key;
pub use types::{Customs, DEFAULT_TARGET, Groups, KNOWN_TARGETS, WorkflowPolicy};
