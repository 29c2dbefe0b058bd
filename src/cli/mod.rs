//! CLI parsing and dispatch.

use crate::constants;
use crate::core::session::ClientOptions;
use crate::util::logging;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use zeroize::Zeroizing;

pub mod cleanup;

/// Exit status for a malformed invocation.
pub const EXIT_USAGE: u8 = 2;

/// Exit status when no session could be created.
pub const EXIT_SESSION_FAILED: u8 = 1;

/// Settings shared by the command handlers.
pub struct CliContext {
    pub marker_key: String,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub client: ClientOptions,
}

/// Password argument; never shown in `Debug` output.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

fn parse_password(s: &str) -> Result<Password, String> {
    Ok(Password(Zeroizing::new(s.to_string())))
}

fn parse_marker_key(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("marker key cannot be empty".into());
    }
    Ok(s.to_string())
}

#[derive(Parser, Debug)]
#[command(
    name = "sxm-net-cleanup",
    version,
    about = "Destroy networks tagged for cleanup in a XenAPI pool",
    disable_help_flag = true
)]
pub struct Cli {
    /// Pool master address (host, host:port or http(s) URL)
    pub master: String,

    /// Controller account name
    pub username: String,

    /// Controller account password
    #[arg(value_parser = parse_password)]
    pub password: Password,

    /// other_config key that marks a network for cleanup
    #[arg(
        long,
        env = "SXM_CLEANUP_MARKER_KEY",
        value_name = "KEY",
        default_value = constants::DEFAULT_MARKER_KEY,
        value_parser = parse_marker_key
    )]
    pub marker_key: String,

    /// Destroy without asking for confirmation
    #[arg(long, short = 'y', env = "SXM_CLEANUP_ASSUME_YES")]
    pub yes: bool,

    /// List the networks that would be destroyed, then exit
    #[arg(long)]
    pub dry_run: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, env = "SXM_CLEANUP_INSECURE")]
    pub insecure: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = constants::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What `main` should do with the process arguments.
#[derive(Debug)]
pub enum Invocation {
    Help { usage: String },
    Version { text: String },
    Usage { usage: String, error: String },
    Run(Cli),
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} [-h|--help] [--yes] [--dry-run] [--insecure] [--marker-key KEY] [--timeout SECS] <pool-master> <username> <password>",
        program
    )
}

fn program_name(arg0: Option<&OsString>) -> String {
    arg0.and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sxm-net-cleanup".to_string())
}

/// Classify the argument list. A help flag anywhere wins over everything else.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = program_name(args.first());

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        return Invocation::Help {
            usage: usage(&program),
        };
    }

    match Cli::try_parse_from(&args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) if e.kind() == ErrorKind::DisplayVersion => Invocation::Version {
            text: e.to_string(),
        },
        Err(e) => Invocation::Usage {
            usage: usage(&program),
            error: e.to_string().lines().next().unwrap_or_default().to_string(),
        },
    }
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        logging::init(self.verbose);

        let ctx = CliContext {
            marker_key: self.marker_key,
            assume_yes: self.yes,
            dry_run: self.dry_run,
            client: ClientOptions {
                timeout: Duration::from_secs(self.timeout),
                accept_invalid_certs: self.insecure,
            },
        };
        let target = cleanup::Target {
            master: self.master,
            username: self.username,
            password: self.password,
        };
        cleanup::run(&ctx, target)
    }
}
