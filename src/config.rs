//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <FILE>`, else `$XDG_CONFIG_HOME/ontap-qtree/ontap-qtree.toml`
//! 3. Environment variables: `ONTAP_QTREE__*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::application::ApplicationError;

const ENV_PREFIX: &str = "ONTAP_QTREE";

/// Throughput bounds used when creating a fixed QoS policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QosConfig {
    pub min_throughput_iops: u64,
    pub max_throughput_iops: u64,
}

impl Default for QosConfig {
    fn default() -> Self {
        Self {
            min_throughput_iops: 10,
            max_throughput_iops: 1500,
        }
    }
}

/// Raw QoS config for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQosConfig {
    pub min_throughput_iops: Option<u64>,
    pub max_throughput_iops: Option<u64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub verify_tls: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub job_poll_interval_ms: Option<u64>,
    pub job_timeout_secs: Option<u64>,
    pub qos: RawQosConfig,
}

/// Unified configuration for ontap-qtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Verify the cluster's TLS certificate (default: false)
    pub verify_tls: bool,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Delay between job status polls
    pub job_poll_interval_ms: u64,
    /// Give up waiting for a job after this long
    pub job_timeout_secs: u64,
    /// QoS policy bounds
    pub qos: QosConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verify_tls: false,
            timeout_secs: 30,
            job_poll_interval_ms: 500,
            job_timeout_secs: 120,
            qos: QosConfig::default(),
        }
    }
}

/// Get the XDG config directory for ontap-qtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ontap-qtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ontap-qtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values win if Some, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            verify_tls: overlay.verify_tls.unwrap_or(self.verify_tls),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            job_poll_interval_ms: overlay
                .job_poll_interval_ms
                .unwrap_or(self.job_poll_interval_ms),
            job_timeout_secs: overlay.job_timeout_secs.unwrap_or(self.job_timeout_secs),
            qos: QosConfig {
                min_throughput_iops: overlay
                    .qos
                    .min_throughput_iops
                    .unwrap_or(self.qos.min_throughput_iops),
                max_throughput_iops: overlay
                    .qos
                    .max_throughput_iops
                    .unwrap_or(self.qos.max_throughput_iops),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist when given. Without it
    ///   the global config file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                debug!("load: explicit config {}", path.display());
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("load: global config {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current, None)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply `ONTAP_QTREE__*` environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment when given (used by tests).
    pub fn apply_env_overrides(
        mut settings: Self,
        source: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(source),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_bool("verify_tls") {
            settings.verify_tls = val;
        }
        if let Ok(val) = config.get::<u64>("timeout_secs") {
            settings.timeout_secs = val;
        }
        if let Ok(val) = config.get::<u64>("job_poll_interval_ms") {
            settings.job_poll_interval_ms = val;
        }
        if let Ok(val) = config.get::<u64>("job_timeout_secs") {
            settings.job_timeout_secs = val;
        }
        if let Ok(val) = config.get::<u64>("qos.min_throughput_iops") {
            settings.qos.min_throughput_iops = val;
        }
        if let Ok(val) = config.get::<u64>("qos.max_throughput_iops") {
            settings.qos.max_throughput_iops = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.qos.min_throughput_iops > self.qos.max_throughput_iops {
            return Err(ApplicationError::Config {
                message: format!(
                    "qos.min_throughput_iops ({}) exceeds qos.max_throughput_iops ({})",
                    self.qos.min_throughput_iops, self.qos.max_throughput_iops
                ),
            });
        }
        Ok(())
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
