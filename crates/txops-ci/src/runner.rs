//! CI stage execution.

use crate::stage::{StageAction, StageConfig, StagePolicy};
use crate::yaml::validate_yaml_files;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use txops_core::{exit_code, ExternalCommand, ProcessError};

/// Width of the `=` rules around each banner.
pub const RULE_WIDTH: usize = 70;

/// Result of a stage execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    /// Stage name.
    pub stage_name: String,

    /// Exit code (0 = success, -1 = killed by a signal or never started).
    pub exit_code: i32,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether execution succeeded.
    pub success: bool,
}

impl StageResult {
    /// Whether this stage passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.success && self.exit_code == 0
    }

    /// Result for a stage whose command could not be started.
    pub fn not_started(stage_name: &str) -> Self {
        Self {
            stage_name: stage_name.to_string(),
            exit_code: -1,
            duration_ms: 0,
            success: false,
        }
    }
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print the framed banner that precedes every stage.
pub fn print_banner(icon: &str, title: &str) {
    println!("\n{}", rule());
    println!("{} {}", icon, title);
    println!("{}", rule());
}

/// Runs one stage with inherited stdio and reports its outcome.
pub struct CiRunner;

impl CiRunner {
    /// Execute a single stage in `workspace` and return the result.
    ///
    /// Output is not captured. For recorded stages a `PASSED`/`FAILED` line
    /// follows the tool's output; informational stages print their fix hint
    /// instead. Whether a failure ends the run is the pipeline's decision
    /// (see [`StagePolicy::exit_on_error`]).
    pub async fn run_command(
        config: &StageConfig,
        workspace: &Path,
    ) -> Result<StageResult, ProcessError> {
        let icon = match config.policy {
            StagePolicy::Informational => "🎨",
            _ => "🔧",
        };
        print_banner(icon, &config.description);

        let start = Instant::now();
        let code = match &config.action {
            StageAction::Command(argv) => {
                let command = ExternalCommand::from_argv(&config.name, argv)?.current_dir(workspace);
                info!(stage = %config.name, command = %command.display(), "Executing stage");
                let status = command.status().await?;
                exit_code(&status)
            }
            StageAction::ValidateYaml(files) => match validate_yaml_files(workspace, files) {
                Ok(()) => {
                    println!("YAML files valid");
                    0
                }
                Err(e) => {
                    println!("{}", e);
                    1
                }
            },
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let result = StageResult {
            stage_name: config.name.clone(),
            exit_code: code,
            duration_ms,
            success: code == 0,
        };
        debug!(stage = %config.name, exit_code = code, duration_ms, "Stage finished");

        if config.policy.is_recorded() {
            if result.passed() {
                println!("✅ {} PASSED", config.description);
            } else {
                println!(
                    "❌ {} FAILED (exit code: {})",
                    config.description, result.exit_code
                );
            }
        }
        if let Some(fix) = &config.fix_command {
            if config.policy == StagePolicy::Informational || !result.passed() {
                println!("💡 To fix, run: {}", fix.join(" "));
            }
        }

        Ok(result)
    }
}
