//! Tests for command line parsing and password resolution

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::error::ErrorKind;
use rstest::rstest;

use ontap_qtree::cli::commands::resolve_password;
use ontap_qtree::cli::{Cli, CliError};
use ontap_qtree::exitcode;
use ontap_qtree::infrastructure::traits::PasswordPrompt;

const FULL_ARGS: &[&str] = &[
    "ontap-qtree",
    "-c",
    "10.0.0.5",
    "-v",
    "vol1",
    "-vs",
    "svm1",
    "-q",
    "qt1",
    "-qos",
    "gold",
    "-sh",
    "2048",
    "-fh",
    "100",
    "-un",
    "jdoe",
];

fn without(flag: &str) -> Vec<&'static str> {
    let mut args = Vec::new();
    let mut skip = false;
    for arg in FULL_ARGS {
        if skip {
            skip = false;
            continue;
        }
        if *arg == flag {
            skip = true;
            continue;
        }
        args.push(*arg);
    }
    args
}

/// Answers with a fixed password and counts how often it was asked.
struct FixedPrompt {
    answer: io::Result<String>,
    asked: AtomicUsize,
}

impl FixedPrompt {
    fn new(answer: io::Result<String>) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }
}

impl PasswordPrompt for FixedPrompt {
    fn read_password(&self, _prompt: &str) -> io::Result<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(password) => Ok(password.clone()),
            Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

// ============================================================
// argument parsing
// ============================================================

#[test]
fn given_legacy_short_flags_when_parsing_then_all_fields_populated() {
    let cli = Cli::try_parse_args_from(FULL_ARGS).unwrap();

    assert_eq!(cli.cluster, "10.0.0.5");
    assert_eq!(cli.volume_name, "vol1");
    assert_eq!(cli.vserver_name, "svm1");
    assert_eq!(cli.qtree_name, "qt1");
    assert_eq!(cli.qos_name, "gold");
    assert_eq!(cli.space_hard, 2048);
    assert_eq!(cli.file_hard, 100);
    assert_eq!(cli.user_name, "jdoe");
    assert_eq!(cli.api_user, "admin");
    assert!(cli.api_pass.is_none());
    assert!(!cli.with_qos);
}

#[test]
fn given_long_flags_when_parsing_then_same_result() {
    let cli = Cli::try_parse_args_from([
        "ontap-qtree",
        "--cluster",
        "10.0.0.5",
        "--volume_name",
        "vol1",
        "--vserver_name",
        "svm1",
        "--qtree_name",
        "qt1",
        "--QoS_name",
        "gold",
        "--space_hard",
        "2048",
        "--file_hard",
        "100",
        "--user_name",
        "jdoe",
        "--api_user",
        "ops",
        "--api_pass",
        "secret",
    ])
    .unwrap();

    assert_eq!(cli.vserver_name, "svm1");
    assert_eq!(cli.api_user, "ops");
    assert_eq!(cli.api_pass.as_deref(), Some("secret"));
}

#[rstest]
#[case("-c")]
#[case("-v")]
#[case("-vs")]
#[case("-q")]
#[case("-qos")]
#[case("-sh")]
#[case("-fh")]
#[case("-un")]
fn given_missing_required_flag_when_parsing_then_usage_error(#[case] flag: &str) {
    let err = Cli::try_parse_args_from(without(flag)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn given_non_numeric_limit_when_parsing_then_value_error() {
    let mut args = FULL_ARGS.to_vec();
    let pos = args.iter().position(|a| *a == "2048").unwrap();
    args[pos] = "2GB";

    let err = Cli::try_parse_args_from(args).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn given_with_qos_when_planning_then_qos_policy_included() {
    let mut args = FULL_ARGS.to_vec();
    args.push("--with-qos");

    let plan = Cli::try_parse_args_from(args).unwrap().plan();

    assert_eq!(plan.qos_policy.as_deref(), Some("gold"));
    assert_eq!(plan.requested_by, "jdoe");
}

#[test]
fn given_no_with_qos_when_planning_then_qos_skipped() {
    let plan = Cli::try_parse_args_from(FULL_ARGS).unwrap().plan();

    assert!(plan.qos_policy.is_none());
    assert_eq!(plan.space_hard_limit, 2048);
    assert_eq!(plan.file_hard_limit, 100);
}

// ============================================================
// password resolution
// ============================================================

#[test]
fn given_password_flag_when_resolving_then_prompt_not_used() {
    let prompt = FixedPrompt::new(Ok("other".to_string()));

    let password = resolve_password(Some("secret"), &prompt).unwrap();

    assert_eq!(password, "secret");
    assert_eq!(prompt.asked.load(Ordering::SeqCst), 0);
}

#[test]
fn given_no_password_flag_when_resolving_then_prompts_once() {
    let prompt = FixedPrompt::new(Ok("secret".to_string()));

    let password = resolve_password(None, &prompt).unwrap();

    assert_eq!(password, "secret");
    assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
}

#[test]
fn given_empty_password_flag_when_resolving_then_prompts() {
    let prompt = FixedPrompt::new(Ok("secret".to_string()));

    let password = resolve_password(Some(""), &prompt).unwrap();

    assert_eq!(password, "secret");
    assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
}

#[test]
fn given_empty_prompt_answer_when_resolving_then_invalid_args() {
    let prompt = FixedPrompt::new(Ok(String::new()));

    let err = resolve_password(Some(""), &prompt).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_prompt_failure_when_resolving_then_io_exit_code() {
    let prompt = FixedPrompt::new(Err(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "no terminal",
    )));

    let err = resolve_password(None, &prompt).unwrap_err();

    assert!(matches!(err, CliError::Prompt(_)));
    assert_eq!(err.exit_code(), exitcode::IOERR);
}
