//! CI pipeline orchestration.

use crate::config::CiConfig;
use crate::gate::CiGate;
use crate::runner::{CiRunner, StageResult};
use crate::stage::{StageConfig, StagePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// One recorded check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

/// Insertion-ordered check name → pass/fail mapping for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckResults {
    entries: Vec<CheckOutcome>,
}

impl CheckResults {
    /// Record a check. Re-recording a name overwrites it in place.
    pub fn record(&mut self, name: &str, passed: bool) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.passed = passed,
            None => self.entries.push(CheckOutcome {
                name: name.to_string(),
                passed,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries.iter().find(|c| c.name == name).map(|c| c.passed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logical AND of every recorded outcome.
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|c| c.passed)
    }
}

/// The fatal stage that ended a run early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortedStage {
    pub stage_name: String,
    pub exit_code: i32,
}

/// Result of a complete CI pipeline execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Recorded checks, in execution order.
    pub checks: CheckResults,

    /// Every stage that actually ran, informational ones included.
    pub stages: Vec<StageResult>,

    /// Optional stages skipped because their tool is missing.
    pub skipped: Vec<String>,

    /// Set when a fatal stage failed and the run stopped there.
    pub aborted: Option<AbortedStage>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Whether the run completed and every recorded check passed.
    pub fn success(&self) -> bool {
        self.aborted.is_none() && CiGate::evaluate(&self.checks).passed
    }

    /// Process exit code: 0 on full success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Number of recorded checks that passed.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Number of recorded checks that failed.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// CI pipeline orchestrator.
pub struct CiPipeline;

impl CiPipeline {
    /// Run the fixed local CI sequence described by `config`.
    pub async fn run(config: &CiConfig) -> PipelineResult {
        Self::run_stages(&config.workspace, config.stages(), &config.security_install_hint).await
    }

    /// Execute `stages` in order, one at a time.
    ///
    /// - `Recorded`: outcome recorded, the run continues.
    /// - `Informational`: outcome shown only.
    /// - `Fatal`: a failure stops the run; later stages never start.
    /// - `Optional`: a missing executable is a warning and the stage is
    ///   skipped; any other start failure is recorded as a failed check.
    pub async fn run_stages(
        workspace: &Path,
        stages: Vec<StageConfig>,
        install_hint: &str,
    ) -> PipelineResult {
        let start = Instant::now();
        let mut checks = CheckResults::default();
        let mut stage_results = Vec::new();
        let mut skipped = Vec::new();
        let mut aborted = None;

        info!(workspace = %workspace.display(), "Starting CI pipeline");

        for config in stages {
            let result = match CiRunner::run_command(&config, workspace).await {
                Ok(result) => result,
                Err(e) if e.is_not_found() && config.policy == StagePolicy::Optional => {
                    warn!(stage = %config.name, error = %e, "Optional tool missing, skipping");
                    println!("⚠️  {}, skipping {}", e, config.name);
                    if !install_hint.is_empty() {
                        println!("   Install with: {}", install_hint);
                    }
                    skipped.push(config.name.clone());
                    continue;
                }
                Err(e) => {
                    warn!(stage = %config.name, error = %e, "Stage could not be started");
                    if config.policy.is_recorded() {
                        println!("❌ {} FAILED ({})", config.description, e);
                    } else {
                        println!("⚠️  {}", e);
                    }
                    StageResult::not_started(&config.name)
                }
            };

            if config.policy.is_recorded() {
                checks.record(&config.name, result.passed());
            }

            let fatal = config.policy.exit_on_error() && !result.passed();
            if fatal {
                warn!(
                    stage = %config.name,
                    exit_code = result.exit_code,
                    "Fatal stage failed, aborting run"
                );
                aborted = Some(AbortedStage {
                    stage_name: config.name.clone(),
                    exit_code: result.exit_code,
                });
            }
            stage_results.push(result);
            if fatal {
                break;
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            duration_ms,
            recorded = checks.len(),
            aborted = aborted.is_some(),
            "CI pipeline finished"
        );

        PipelineResult {
            checks,
            stages: stage_results,
            skipped,
            aborted,
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_results_keep_insertion_order() {
        let mut checks = CheckResults::default();
        checks.record("yaml", true);
        checks.record("lint", false);
        checks.record("tests", true);

        let names: Vec<_> = checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["yaml", "lint", "tests"]);
        assert!(!checks.all_passed());
    }

    #[test]
    fn test_check_names_are_unique() {
        let mut checks = CheckResults::default();
        checks.record("lint", false);
        checks.record("lint", true);

        assert_eq!(checks.len(), 1);
        assert_eq!(checks.get("lint"), Some(true));
        assert_eq!(checks.get("yaml"), None);
    }

    #[test]
    fn test_check_results_serialize_as_list() {
        let mut checks = CheckResults::default();
        checks.record("yaml", true);
        let json = serde_json::to_value(&checks).unwrap();
        assert_eq!(json, serde_json::json!([{ "name": "yaml", "passed": true }]));
    }

    #[test]
    fn test_aborted_run_is_failure() {
        let mut checks = CheckResults::default();
        checks.record("tests", true);
        let result = PipelineResult {
            checks,
            stages: vec![],
            skipped: vec![],
            aborted: Some(AbortedStage {
                stage_name: "tests".to_string(),
                exit_code: 1,
            }),
            duration_ms: 0,
        };
        assert!(!result.success());
        assert_eq!(result.exit_code(), 1);
    }
}
