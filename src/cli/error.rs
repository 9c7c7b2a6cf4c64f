//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("validation failed for {0} field(s)")]
    ValidationFailed(usize),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::ValidationFailed(_) => crate::exitcode::DATAERR,
            CliError::Application(e) | CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::FormNotFound(_) => crate::exitcode::NOINPUT,
                ApplicationError::MalformedForm { .. } => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                _ => crate::exitcode::SOFTWARE,
            },
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
        }
    }
}
