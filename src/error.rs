//! Error types for the jtupdate CLI.
//!
//! Every error is fatal: it is propagated up to `main`, printed once, and
//! mapped to a non-zero exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for jtupdate operations.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The declaration file could not be parsed.
    #[error("error in {file} line {line}: {message}")]
    Declaration {
        file: String,
        line: usize,
        message: String,
    },

    /// The resolved configuration is inconsistent (unknown group, no cores, bad policy).
    #[error("{0}")]
    Config(String),

    /// A required environment variable or directory is missing or inaccessible.
    #[error("{0}")]
    Environment(String),

    /// Writing generated files failed.
    #[error("{0}")]
    Io(String),

    /// The workflow template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),
}

impl UpdateError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::Declaration { .. } => exit_codes::CONFIG_ERROR,
            UpdateError::Config(_) => exit_codes::CONFIG_ERROR,
            UpdateError::Environment(_) => exit_codes::ENVIRONMENT_ERROR,
            UpdateError::Io(_) => exit_codes::IO_FAILURE,
            UpdateError::Template(_) => exit_codes::TEMPLATE_FAILURE,
        }
    }
}

/// Result type alias for jtupdate operations.
pub type Result<T> = std::result::Result<T, UpdateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_error_has_config_exit_code() {
        let err = UpdateError::Declaration {
            file: ".jtupdate".to_string(),
            line: 3,
            message: "dangling text".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn environment_error_has_correct_exit_code() {
        let err = UpdateError::Environment("JTROOT is not defined".to_string());
        assert_eq!(err.exit_code(), exit_codes::ENVIRONMENT_ERROR);
    }

    #[test]
    fn io_error_has_correct_exit_code() {
        let err = UpdateError::Io("cannot create folder".to_string());
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    }

    #[test]
    fn template_error_has_correct_exit_code() {
        let err = UpdateError::Template("unclosed block".to_string());
        assert_eq!(err.exit_code(), exit_codes::TEMPLATE_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = UpdateError::Declaration {
            file: ".jtupdate".to_string(),
            line: 12,
            message: "custom command is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error in .jtupdate line 12: custom command is empty"
        );

        let err = UpdateError::Template("undefined variable 'x'".to_string());
        assert_eq!(err.to_string(), "template error: undefined variable 'x'");
    }
}
