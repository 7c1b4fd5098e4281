//! Command-line arguments for `start-api`.
//!
//! The `--env` choices depend on what is in the working directory, so the
//! derived parser is adjusted at runtime before matching.

use crate::env::FALLBACK_ENVIRONMENT;
use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "start-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Start the API server with an environment configuration", long_about = None)]
pub struct LaunchArgs {
    /// Environment profile to load [default: local]
    #[arg(long)]
    pub env: Option<String>,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Disable auto-reload on code changes
    #[arg(long)]
    pub no_reload: bool,

    /// Application reference handed to the runner
    #[arg(long, env = "API_APP", default_value = "api.main:app")]
    pub app: String,

    /// Web-server runner executable
    #[arg(long, env = "API_RUNNER", default_value = "uvicorn")]
    pub runner: String,

    /// Runner log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json: bool,
}

impl LaunchArgs {
    /// The selected profile; `local` when `--env` was not given, whether or
    /// not `local` exists.
    pub fn environment(&self) -> &str {
        self.env.as_deref().unwrap_or(FALLBACK_ENVIRONMENT)
    }

    pub fn reload(&self) -> bool {
        !self.no_reload
    }
}

/// Parse `args` with `--env` restricted to `allowed`.
///
/// Values outside `allowed` are rejected here, before any file lookup. The
/// `local` fallback is applied after parsing and is not checked against
/// `allowed`.
pub fn parse_args<I, T>(allowed: &[String], args: I) -> Result<LaunchArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = LaunchArgs::command().mut_arg("env", |arg| {
        arg.value_parser(PossibleValuesParser::new(allowed.to_vec()))
    });
    let matches = command.try_get_matches_from_mut(args)?;
    LaunchArgs::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
}
