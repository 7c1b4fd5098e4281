//! Local CI configuration.
//!
//! The stage order and policies are fixed; what can vary is where the run
//! happens and which argv each tool is invoked with.

use crate::stage::{BuiltinStage, StageAction, StageConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Workflow files the YAML check parses.
pub const WORKFLOW_FILES: [&str; 4] = [
    ".github/workflows/ci.yml",
    ".github/workflows/codeql.yml",
    ".github/workflows/pylint.yml",
    ".github/workflows/tests.yml",
];

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Configuration for a local CI run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CiConfig {
    /// Directory commands run in; YAML paths are relative to it.
    pub workspace: PathBuf,

    pub yaml_files: Vec<PathBuf>,

    pub lint_command: Vec<String>,

    pub format_command: Vec<String>,

    /// Printed after the format check.
    pub format_fix_command: Vec<String>,

    pub test_command: Vec<String>,

    pub security_command: Vec<String>,

    /// Install hint printed when the security scanner is missing.
    pub security_install_hint: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            yaml_files: WORKFLOW_FILES.iter().map(PathBuf::from).collect(),
            lint_command: argv(&["pylint", "api/", "src/", "--max-line-length=120", "--exit-zero"]),
            format_command: argv(&["black", "--check", "--diff", "api/", "src/", "tests/"]),
            format_fix_command: argv(&["black", "api/", "src/", "tests/"]),
            test_command: argv(&["pytest", "--cov=src", "--cov-report=term-missing", "-q"]),
            security_command: argv(&["bandit", "-r", "api/", "src/", "-ll", "--skip", "B101,B601"]),
            security_install_hint: "pip install bandit".to_string(),
        }
    }
}

impl CiConfig {
    /// Default configuration rooted at `workspace`.
    pub fn for_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            ..Self::default()
        }
    }

    /// The fixed stage sequence for this configuration.
    pub fn stages(&self) -> Vec<StageConfig> {
        BuiltinStage::ORDER
            .iter()
            .map(|&stage| {
                let action = match stage {
                    BuiltinStage::Yaml => StageAction::ValidateYaml(self.yaml_files.clone()),
                    BuiltinStage::Lint => StageAction::Command(self.lint_command.clone()),
                    BuiltinStage::Format => StageAction::Command(self.format_command.clone()),
                    BuiltinStage::Tests => StageAction::Command(self.test_command.clone()),
                    BuiltinStage::Security => StageAction::Command(self.security_command.clone()),
                };
                let config = StageConfig::from_builtin(stage, action);
                if stage == BuiltinStage::Format {
                    config.with_fix_command(self.format_fix_command.clone())
                } else {
                    config
                }
            })
            .collect()
    }
}
