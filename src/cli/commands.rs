//! Command execution: credentials, service wiring and outcome reporting

use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{ProvisionPlan, ProvisionReport};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{PasswordPrompt, TerminalPrompt};
use crate::infrastructure::HostConnection;

/// Run the provisioning workflow described by `cli`.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    let password = resolve_password(cli.api_pass.as_deref(), &TerminalPrompt)?;
    let connection = HostConnection::new(&cli.cluster, &cli.api_user, password)
        .with_verify(settings.verify_tls);
    debug!("connection: {:?}", connection);

    let container = ServiceContainer::new(settings, &connection)?;
    let report = run_provisioning(&cli.plan(), &container, &mut io::stdout().lock())?;
    report_status(&report)
}

/// Password from the command line, or from `prompt` when none (or an empty one) was given.
///
/// An empty answer to the prompt is rejected so no API call goes out without one.
pub fn resolve_password(given: Option<&str>, prompt: &dyn PasswordPrompt) -> CliResult<String> {
    let password = match given.filter(|p| !p.is_empty()) {
        Some(password) => password.to_string(),
        None => prompt.read_password("Password").map_err(CliError::Prompt)?,
    };
    if password.is_empty() {
        return Err(CliError::InvalidArgs("API password must not be empty".into()));
    }
    Ok(password)
}

/// Provision `plan` and write one line per step to `out`.
#[instrument(skip(container, out))]
pub fn run_provisioning(
    plan: &ProvisionPlan,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<ProvisionReport> {
    let report = container.provisioning().provision(plan);
    for outcome in report.outcomes() {
        let written = if outcome.is_created() {
            output::step_created(out, &outcome.message())
        } else {
            output::step_failed(out, &outcome.message())
        };
        written.map_err(CliError::Output)?;
    }
    Ok(report)
}

/// `Ok` when every step was created, otherwise `CliError::Incomplete`.
pub fn report_status(report: &ProvisionReport) -> CliResult<()> {
    if report.all_created() {
        Ok(())
    } else {
        Err(CliError::Incomplete {
            failed: report.failures(),
            total: report.outcomes().len(),
        })
    }
}
