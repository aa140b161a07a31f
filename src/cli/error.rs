//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::ApiError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("cannot read password: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("{failed} of {total} provisioning steps failed")]
    Incomplete { failed: usize, total: usize },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Prompt(_) | CliError::Output(_) => crate::exitcode::IOERR,
            CliError::Incomplete { .. } => crate::exitcode::UNAVAILABLE,
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Api(ApiError::InvalidAddress { .. }) => crate::exitcode::USAGE,
                ApplicationError::Api(_) => crate::exitcode::UNAVAILABLE,
                ApplicationError::Encode(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
