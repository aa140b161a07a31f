//! Application-level errors (wraps API errors)

use thiserror::Error;

use crate::infrastructure::ApiError;

/// Application errors wrap API errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("cannot encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
