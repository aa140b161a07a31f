//! I/O boundary traits for testability
//!
//! These traits abstract the remote API and the terminal, allowing services
//! to be tested with fake implementations.

use std::io;

use serde_json::Value;

use crate::infrastructure::ApiResult;

/// Cluster management API abstraction.
pub trait OntapApi: Send + Sync {
    /// Create a record by POSTing `body` to `collection` (relative to `/api/`).
    ///
    /// Returns once the record exists, i.e. after any asynchronous job the
    /// cluster started for it has finished.
    fn post(&self, collection: &str, body: &Value) -> ApiResult<()>;
}

/// Non-echoing password input.
pub trait PasswordPrompt: Send + Sync {
    /// Ask for a password. Blocks until the user answers.
    fn read_password(&self, prompt: &str) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Terminal prompt using dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, prompt: &str) -> io::Result<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(io::Error::other)
    }
}
