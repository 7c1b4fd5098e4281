//! `local-ci` - run the CI checks locally before pushing.
//!
//! Mirrors what the hosted workflows do so problems show up before a push.
//! Exits 0 when every recorded check passed, 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use txops_ci::runner::rule;
use txops_ci::{render_summary, write_json_report, CiConfig, CiPipeline};

#[derive(Parser)]
#[command(name = "local-ci")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run local CI checks before pushing", long_about = None)]
struct Cli {
    /// Directory to run the checks in
    #[arg(short, long, env = "LOCAL_CI_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Also write the run as a JSON report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    txops_core::init_tracing(cli.json, txops_core::verbosity(cli.verbose));

    println!("{}", rule());
    println!("🚀 Running Local CI Checks");
    println!("{}", rule());

    let config = CiConfig::for_workspace(&cli.workspace);
    let result = CiPipeline::run(&config).await;

    if let Some(path) = &cli.report {
        write_json_report(&result, path)
            .with_context(|| format!("Failed to write CI report to {}", path.display()))?;
        info!(path = %path.display(), "Wrote CI report");
    }

    match &result.aborted {
        Some(aborted) => {
            println!(
                "\n❌ Aborting: '{}' failed (exit code: {})",
                aborted.stage_name, aborted.exit_code
            );
        }
        None => print!("{}", render_summary(&result)),
    }

    Ok(ExitCode::from(result.exit_code()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_needs_no_flags() {
        let cli = Cli::try_parse_from(["local-ci"]).unwrap();
        assert!(cli.report.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_report_flag() {
        let cli = Cli::try_parse_from(["local-ci", "--report", "ci.json", "-w", "/tmp"]).unwrap();
        assert_eq!(cli.report, Some(PathBuf::from("ci.json")));
        assert_eq!(cli.workspace, PathBuf::from("/tmp"));
    }
}
