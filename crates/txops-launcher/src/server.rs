//! Hand-off to the web-server runner.

use crate::env::ENV_FILE_VAR;
use crate::error::LaunchError;
use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;
use tracing::{info, warn};
use txops_core::{exit_code, ExternalCommand};

/// How long the server gets to stop on its own after Ctrl-C.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Exit code shells report for a process ended by SIGINT.
const SIGINT_EXIT_CODE: i32 = 130;

#[cfg(unix)]
const SIGINT: i32 = 2;

/// Whether the runner died from, or reported, an interrupt.
fn ended_by_interrupt(status: &ExitStatus) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(SIGINT) {
            return true;
        }
    }
    status.code() == Some(SIGINT_EXIT_CODE)
}

/// Parameters passed to the web-server runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub runner: String,
    pub app: String,
    pub host: String,
    pub port: u16,
    pub reload: bool,
    pub log_level: String,
}

impl ServerOptions {
    /// `<runner> <app> --host H --port P [--reload] --log-level L`, with
    /// `ENV_FILE` pointing at `env_file`.
    pub fn command(&self, env_file: &Path) -> ExternalCommand {
        let mut command = ExternalCommand::new(&self.runner)
            .arg(&self.app)
            .args(["--host", self.host.as_str()])
            .args(["--port".to_string(), self.port.to_string()]);
        if self.reload {
            command = command.arg("--reload");
        }
        command
            .args(["--log-level", self.log_level.as_str()])
            .env(ENV_FILE_VAR, env_file.display().to_string())
    }

    /// Base URL, API docs and ReDoc.
    pub fn urls(&self) -> Vec<String> {
        let base = format!("http://localhost:{}", self.port);
        vec![
            base.clone(),
            format!("{}/docs", base),
            format!("{}/redoc", base),
        ]
    }
}

/// Startup banner shown before the hand-off.
pub fn render_banner(options: &ServerOptions, environment: &str, env_file: &Path) -> String {
    let rule = "=".repeat(70);
    let urls = options.urls();
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Starting API server");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "\nEnvironment: {}", environment);
    let _ = writeln!(out, "Config file: {}", env_file.display());
    let _ = writeln!(out, "\nAPI will be available at:");
    let _ = writeln!(out, "  - {}", urls[0]);
    let _ = writeln!(out, "  - API Docs: {}", urls[1]);
    let _ = writeln!(out, "  - ReDoc: {}", urls[2]);
    if options.reload {
        let _ = writeln!(out, "\nAuto-reload is enabled");
    }
    let _ = writeln!(out, "\nPress CTRL+C to stop");
    let _ = writeln!(out, "{}", rule);
    out
}

/// How serving ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The server exited by itself with this code.
    Exited(i32),

    /// Ctrl-C was received and the server was stopped.
    Interrupted,
}

impl ServeOutcome {
    /// Exit status for the launcher process.
    pub fn exit_status(&self) -> u8 {
        match self {
            ServeOutcome::Exited(code) => u8::try_from(*code).unwrap_or(1),
            ServeOutcome::Interrupted => 0,
        }
    }
}

/// Run the server until it exits or Ctrl-C arrives.
///
/// The child shares the terminal's process group, so it sees the same
/// SIGINT; it is only killed if it has not stopped within
/// [`SHUTDOWN_GRACE`].
pub async fn serve(command: &ExternalCommand) -> Result<ServeOutcome, LaunchError> {
    let mut child = command.spawn()?;
    info!(command = %command.display(), "Server process started");

    // The runner shares the terminal's process group and receives the same
    // SIGINT, so the signal branch must win whenever both are ready.
    tokio::select! {
        biased;

        signal = tokio::signal::ctrl_c() => {
            signal?;
            println!("\n\nShutting down API server...");
            if tokio::time::timeout(SHUTDOWN_GRACE, child.wait()).await.is_err() {
                warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Server did not stop in time, killing it");
                child.kill().await?;
            }
            Ok(ServeOutcome::Interrupted)
        }
        status = child.wait() => {
            let status = status?;
            if ended_by_interrupt(&status) {
                println!("\n\nAPI server interrupted");
                return Ok(ServeOutcome::Interrupted);
            }
            let code = exit_code(&status);
            info!(exit_code = code, "Server process exited");
            Ok(ServeOutcome::Exited(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(reload: bool) -> ServerOptions {
        ServerOptions {
            runner: "uvicorn".to_string(),
            app: "api.main:app".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            reload,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_command_with_reload() {
        let command = options(true).command(Path::new("config.local.env"));
        assert_eq!(
            command.display(),
            "uvicorn api.main:app --host 0.0.0.0 --port 8000 --reload --log-level info"
        );
        assert_eq!(
            command.get_envs(),
            &[("ENV_FILE".to_string(), "config.local.env".to_string())]
        );
    }

    #[test]
    fn test_command_without_reload() {
        let command = options(false).command(Path::new(".env"));
        assert!(!command.get_args().contains(&"--reload".to_string()));
    }

    #[test]
    fn test_banner_mentions_urls_and_file() {
        let banner = render_banner(&options(true), "local", Path::new("config.local.env"));
        assert!(banner.contains("http://localhost:8000"));
        assert!(banner.contains("http://localhost:8000/docs"));
        assert!(banner.contains("http://localhost:8000/redoc"));
        assert!(banner.contains("Config file: config.local.env"));
        assert!(banner.contains("Press CTRL+C to stop"));
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(ServeOutcome::Interrupted.exit_status(), 0);
        assert_eq!(ServeOutcome::Exited(0).exit_status(), 0);
        assert_eq!(ServeOutcome::Exited(3).exit_status(), 3);
        assert_eq!(ServeOutcome::Exited(-1).exit_status(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_sigint_death_counts_as_interrupt() {
        use std::os::unix::process::ExitStatusExt;

        assert!(ended_by_interrupt(&ExitStatus::from_raw(SIGINT)));
        assert!(ended_by_interrupt(&ExitStatus::from_raw(130 << 8)));
        assert!(!ended_by_interrupt(&ExitStatus::from_raw(0)));
        assert!(!ended_by_interrupt(&ExitStatus::from_raw(1 << 8)));
        // SIGTERM
        assert!(!ended_by_interrupt(&ExitStatus::from_raw(15)));
    }

    #[tokio::test]
    async fn test_serve_returns_exit_code() {
        let command = ExternalCommand::new("sh").args(["-c", "exit 4"]);
        let outcome = serve(&command).await.unwrap();
        assert_eq!(outcome, ServeOutcome::Exited(4));
    }

    #[tokio::test]
    async fn test_serve_missing_runner() {
        let command = ExternalCommand::new("txops-runner-that-does-not-exist");
        let err = serve(&command).await.unwrap_err();
        assert!(matches!(err, LaunchError::Process(ref e) if e.is_not_found()));
    }
}
