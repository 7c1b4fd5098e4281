//! Integration tests for the local CI pipeline, with substitute tools.

use std::path::{Path, PathBuf};
use txops_ci::{CiConfig, CiGate, CiPipeline, StageConfig, StagePolicy};

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// A config whose tools all succeed and whose workflow files are valid.
fn passing_config(workspace: &Path) -> CiConfig {
    let workflows = workspace.join(".github/workflows");
    std::fs::create_dir_all(&workflows).unwrap();
    for name in ["ci.yml", "codeql.yml", "pylint.yml", "tests.yml"] {
        std::fs::write(workflows.join(name), "name: CI\non:\n  push:\n").unwrap();
    }

    CiConfig {
        workspace: workspace.to_path_buf(),
        lint_command: argv(&["true"]),
        format_command: argv(&["true"]),
        format_fix_command: argv(&["echo", "fix"]),
        test_command: argv(&["true"]),
        security_command: argv(&["true"]),
        ..CiConfig::default()
    }
}

/// Test: every tool passes
#[tokio::test]
async fn test_successful_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let result = CiPipeline::run(&passing_config(dir.path())).await;

    assert!(result.success(), "Pipeline should succeed");
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.passed_count(), 4, "yaml, lint, tests and security");
    assert_eq!(result.failed_count(), 0);
    assert_eq!(result.stages.len(), 5, "format runs but is not recorded");

    let names: Vec<_> = result.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["yaml", "lint", "tests", "security"]);
}

/// Test: a broken workflow file fails the yaml check but the run continues
#[tokio::test]
async fn test_invalid_yaml_recorded_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = passing_config(dir.path());
    std::fs::write(
        dir.path().join(".github/workflows/codeql.yml"),
        "jobs: [unterminated\n",
    )
    .unwrap();

    let result = CiPipeline::run(&config).await;

    assert_eq!(result.checks.get("yaml"), Some(false));
    assert_eq!(result.checks.get("lint"), Some(true));
    assert_eq!(result.checks.get("tests"), Some(true));
    assert_eq!(result.checks.get("security"), Some(true));
    assert!(result.aborted.is_none());
    assert_eq!(result.exit_code(), 1);
}

/// Test: a missing workflow file counts as a yaml failure
#[tokio::test]
async fn test_missing_workflow_file_fails_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let config = passing_config(dir.path());
    std::fs::remove_file(dir.path().join(".github/workflows/tests.yml")).unwrap();

    let result = CiPipeline::run(&config).await;
    assert_eq!(result.checks.get("yaml"), Some(false));
    assert!(!result.success());
}

/// Test: failing tests abort the run before the security scan
#[tokio::test]
async fn test_failing_tests_abort_before_security() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = passing_config(dir.path());
    config.test_command = argv(&["sh", "-c", "exit 2"]);
    config.security_command = argv(&["touch", "security-ran"]);

    let result = CiPipeline::run(&config).await;

    let aborted = result.aborted.as_ref().expect("run should abort");
    assert_eq!(aborted.stage_name, "tests");
    assert_eq!(aborted.exit_code, 2);
    assert_eq!(result.exit_code(), 1);
    assert_eq!(result.checks.get("security"), None);
    assert!(
        !dir.path().join("security-ran").exists(),
        "security scan must not run after a fatal failure"
    );
}

/// Test: the informational format check never affects the outcome
#[tokio::test]
async fn test_format_failure_is_informational() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = passing_config(dir.path());
    config.format_command = argv(&["false"]);

    let result = CiPipeline::run(&config).await;

    assert!(result.success());
    assert_eq!(result.checks.get("format"), None);
    assert!(result.stages.iter().any(|s| s.stage_name == "format" && !s.passed()));
}

/// Test: a missing security scanner is skipped, not failed
#[tokio::test]
async fn test_missing_security_tool_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = passing_config(dir.path());
    config.security_command = argv(&["txops-scanner-that-does-not-exist", "-r", "src/"]);

    let result = CiPipeline::run(&config).await;

    assert!(result.success());
    assert_eq!(result.skipped, vec!["security".to_string()]);
    assert_eq!(result.checks.get("security"), None);
}

/// Test: a security scanner that runs and reports findings fails the run
#[tokio::test]
async fn test_security_findings_fail_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = passing_config(dir.path());
    config.security_command = argv(&["false"]);

    let result = CiPipeline::run(&config).await;

    assert_eq!(result.checks.get("security"), Some(false));
    assert!(result.aborted.is_none());
    assert_eq!(result.exit_code(), 1);
}

/// Test: a missing lint tool is recorded as a failure
#[tokio::test]
async fn test_missing_lint_tool_recorded_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = passing_config(dir.path());
    config.lint_command = argv(&["txops-linter-that-does-not-exist"]);

    let result = CiPipeline::run(&config).await;

    assert_eq!(result.checks.get("lint"), Some(false));
    assert_eq!(result.checks.get("tests"), Some(true));
    assert!(!result.success());
}

/// Test: exit code is 0 iff every recorded check passed
#[tokio::test]
async fn test_exit_code_matches_gate() {
    let stages = vec![
        StageConfig::custom("ok".to_string(), argv(&["true"]), StagePolicy::Recorded),
        StageConfig::custom("bad".to_string(), argv(&["false"]), StagePolicy::Recorded),
        StageConfig::custom("info".to_string(), argv(&["false"]), StagePolicy::Informational),
    ];

    let result = CiPipeline::run_stages(&PathBuf::from("."), stages, "").await;
    let verdict = CiGate::evaluate(&result.checks);

    assert!(!verdict.passed);
    assert_eq!(verdict.violations, vec!["Check 'bad' failed".to_string()]);
    assert_eq!(result.exit_code(), 1);
    assert_eq!(result.checks.len(), 2);
}
