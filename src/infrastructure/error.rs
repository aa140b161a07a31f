//! Infrastructure-level errors raised by the REST client

use thiserror::Error;

/// Errors from talking to the cluster management API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error(
        "HTTP {status}: {message}{}",
        .code.as_deref().map(|c| format!(" (code {c})")).unwrap_or_default()
    )]
    Rejected {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("job {uuid} failed: {message}")]
    Job { uuid: String, message: String },

    #[error("job {uuid} did not finish within {waited_secs}s")]
    JobTimeout { uuid: String, waited_secs: u64 },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status for rejections, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type ApiResult<T> = Result<T, ApiError>;
