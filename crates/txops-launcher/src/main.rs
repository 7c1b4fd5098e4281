//! `start-api` - start the API server with a selected environment file.

use anyhow::{Context, Result};
use std::process::ExitCode;

use txops_launcher::{launch, parse_args, EnvironmentDir};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let dir = EnvironmentDir::current().context("Failed to read working directory")?;
    let allowed = dir
        .allowed_environments()
        .context("Failed to scan for environment files")?;
    let args = parse_args(&allowed, std::env::args_os()).unwrap_or_else(|e| e.exit());

    txops_core::init_tracing(args.json, txops_core::verbosity(args.verbose));

    let outcome = launch(&dir, &args)
        .await
        .context("Failed to start API server")?;
    Ok(ExitCode::from(outcome.exit_status()))
}
