//! Launch flow: resolve the environment, then serve.

use crate::cli::LaunchArgs;
use crate::env::EnvironmentDir;
use crate::error::{display_candidates, LaunchError};
use crate::server::{render_banner, serve, ServeOutcome, ServerOptions};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Terminal state of a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// No file for the environment; nothing was started.
    ConfigMissing,

    /// The server was started and has since stopped.
    Served(ServeOutcome),
}

impl LaunchOutcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            LaunchOutcome::ConfigMissing => 1,
            LaunchOutcome::Served(outcome) => outcome.exit_status(),
        }
    }
}

impl From<&LaunchArgs> for ServerOptions {
    fn from(args: &LaunchArgs) -> Self {
        Self {
            runner: args.runner.clone(),
            app: args.app.clone(),
            host: args.host.clone(),
            port: args.port,
            reload: args.reload(),
            log_level: args.log_level.clone(),
        }
    }
}

/// Guidance printed when an environment has no configuration file.
pub fn render_missing_config(
    name: &str,
    candidates: &[PathBuf],
    available: &[String],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "❌ Configuration for environment '{}' not found", name);
    let _ = writeln!(out, "   Looked for: {}", display_candidates(candidates));
    if available.is_empty() {
        let _ = writeln!(out, "   No environment files found in this directory.");
    } else {
        let _ = writeln!(out, "   Available environments: {}", available.join(", "));
    }
    if let Some(first) = candidates.first() {
        let _ = writeln!(
            out,
            "   Create {} (e.g. from .env.example) and try again.",
            first.display()
        );
    }
    out
}

/// Resolve the selected environment inside `dir` and hand off to the runner.
///
/// A missing configuration prints guidance and returns
/// [`LaunchOutcome::ConfigMissing`] without touching the filesystem or
/// starting anything.
pub async fn launch(dir: &EnvironmentDir, args: &LaunchArgs) -> Result<LaunchOutcome, LaunchError> {
    let env_file = match dir.get_env_file_path(args.environment()) {
        Ok(path) => path,
        Err(LaunchError::EnvFileNotFound { name, candidates }) => {
            let available: Vec<String> = dir.get_available_environments()?.into_iter().collect();
            warn!(environment = %name, "Environment file not found");
            print!("{}", render_missing_config(&name, &candidates, &available));
            return Ok(LaunchOutcome::ConfigMissing);
        }
        Err(e) => return Err(e),
    };
    info!(environment = %args.environment(), env_file = %env_file.display(), "Resolved environment");

    match dir.count_entries(&env_file) {
        Ok(count) => debug!(env_file = %env_file.display(), entries = count, "Environment file loaded"),
        Err(e) => warn!(env_file = %env_file.display(), error = %e, "Environment file could not be parsed"),
    }
    if let Err(e) = dir.write_active_marker(&env_file) {
        warn!(error = %e, "Could not write active environment marker");
    }

    let options = ServerOptions::from(args);
    print!("{}", render_banner(&options, args.environment(), &env_file));
    println!();

    let command = options.command(&env_file).current_dir(dir.root());
    let outcome = serve(&command).await?;
    Ok(LaunchOutcome::Served(outcome))
}
