//! Connection settings for one cluster

use std::fmt;

use url::Url;

use crate::infrastructure::{ApiError, ApiResult};

/// Host and credentials used for every API call of a run.
///
/// Built once at startup and handed to the REST client; nothing reads it
/// from global state.
#[derive(Clone)]
pub struct HostConnection {
    host: String,
    username: String,
    password: String,
    verify: bool,
}

impl HostConnection {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            verify: true,
        }
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn verify(&self) -> bool {
        self.verify
    }

    /// Root of the REST API, always ending in `/api/`.
    ///
    /// A bare `host[:port]` gets `https://`; an explicit scheme is kept.
    pub fn base_url(&self) -> ApiResult<Url> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ApiError::InvalidAddress {
                address: self.host.clone(),
                reason: "empty host".into(),
            });
        }
        let root = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        let root = root.strip_suffix("/api").unwrap_or(&root);
        Url::parse(&format!("{root}/api/")).map_err(|e| ApiError::InvalidAddress {
            address: self.host.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for HostConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConnection")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify", &self.verify)
            .finish()
    }
}
