//! Integration tests for Settings config loading.
//!
//! These tests load explicit config files from temp directories, so the
//! user's global config never takes part.

use std::fs;

use tempfile::TempDir;

use ontap_qtree::application::ApplicationError;
use ontap_qtree::config::Settings;

#[test]
fn given_config_file_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ontap-qtree.toml");
    fs::write(
        &path,
        r#"
verify_tls = true
job_timeout_secs = 300

[qos]
max_throughput_iops = 5000
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    // Assert
    assert!(settings.verify_tls);
    assert_eq!(settings.job_timeout_secs, 300);
    assert_eq!(settings.qos.max_throughput_iops, 5000);
    // untouched fields keep their defaults
    assert_eq!(settings.qos.min_throughput_iops, 10);
    assert_eq!(settings.job_poll_interval_ms, 500);
}

#[test]
fn given_empty_config_file_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.timeout_secs, 30);
    assert!(!settings.verify_tls);
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = Settings::load(Some(path.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_config_file_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("broken.toml"), "got: {err}");
}

#[test]
fn given_inverted_qos_bounds_in_file_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("qos.toml");
    fs::write(
        &path,
        r#"
[qos]
min_throughput_iops = 2000
max_throughput_iops = 1000
"#,
    )
    .unwrap();

    let result = Settings::load(Some(path.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
