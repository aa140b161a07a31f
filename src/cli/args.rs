//! CLI argument definitions using clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::ProvisionPlan;

/// Multi-letter single-dash flags and the long flag each one stands for.
///
/// clap only knows single-character short flags, so these are rewritten
/// before parsing.
pub const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-vs", "--vserver_name"),
    ("-qos", "--QoS_name"),
    ("-sh", "--space_hard"),
    ("-fh", "--file_hard"),
    ("-un", "--user_name"),
];

/// Create a qtree with a tree quota rule (and optionally a QoS policy) on an ONTAP cluster
#[derive(Parser, Debug)]
#[command(name = "ontap-qtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API server IP:port details
    #[arg(short = 'c', long = "cluster", value_name = "CLUSTER")]
    pub cluster: String,

    /// Volume to create the qtree in
    #[arg(short = 'v', long = "volume_name", visible_alias = "volume-name")]
    pub volume_name: String,

    /// SVM owning the volume (-vs)
    #[arg(long = "vserver_name", visible_alias = "vserver-name")]
    pub vserver_name: String,

    /// Qtree to create
    #[arg(short = 'q', long = "qtree_name", visible_alias = "qtree-name")]
    pub qtree_name: String,

    /// QoS policy name, created only with --with-qos (-qos)
    #[arg(long = "QoS_name", visible_alias = "qos-name")]
    pub qos_name: String,

    /// Quota space hard limit (-sh)
    #[arg(long = "space_hard", visible_alias = "space-hard")]
    pub space_hard: u64,

    /// Quota file hard limit (-fh)
    #[arg(long = "file_hard", visible_alias = "file-hard")]
    pub file_hard: u64,

    /// Requesting user, recorded in the log (-un)
    #[arg(long = "user_name", visible_alias = "user-name")]
    pub user_name: String,

    /// API username
    #[arg(short = 'u', long = "api_user", visible_alias = "api-user", default_value = "admin")]
    pub api_user: String,

    /// API password (prompted if omitted)
    #[arg(short = 'p', long = "api_pass", visible_alias = "api-pass")]
    pub api_pass: Option<String>,

    /// Also create the QoS policy
    #[arg(long)]
    pub with_qos: bool,

    /// Settings file (default: ~/.config/ontap-qtree/ontap-qtree.toml)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Debug output, repeat for more (-d -d -d)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    /// Parse the process arguments, accepting the legacy short flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse `args` (program name first), accepting the legacy short flags.
    pub fn try_parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The provisioning work requested on the command line.
    pub fn plan(&self) -> ProvisionPlan {
        ProvisionPlan {
            volume_name: self.volume_name.clone(),
            vserver_name: self.vserver_name.clone(),
            qtree_name: self.qtree_name.clone(),
            qos_policy: self.with_qos.then(|| self.qos_name.clone()),
            space_hard_limit: self.space_hard,
            file_hard_limit: self.file_hard,
            requested_by: self.user_name.clone(),
        }
    }
}

/// Rewrite legacy multi-letter short flags (`-vs`, `-vs=x`) to their long form.
///
/// Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(s) => rewrite_legacy_flag(s).map(OsString::from).unwrap_or(arg),
                None => arg,
            }
        })
        .collect()
}

fn rewrite_legacy_flag(arg: &str) -> Option<String> {
    let (flag, value) = match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (arg, None),
    };
    LEGACY_FLAGS
        .iter()
        .find(|(short, _)| *short == flag)
        .map(|(_, long)| match value {
            Some(v) => format!("{long}={v}"),
            None => long.to_string(),
        })
}
