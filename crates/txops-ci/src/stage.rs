//! CI stage definitions and configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The fixed local CI stages, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStage {
    /// Parse the GitHub Actions workflow files
    Yaml,

    /// pylint, non-blocking
    Lint,

    /// black --check, informational only
    Format,

    /// pytest with coverage, aborts the run on failure
    Tests,

    /// bandit, skipped when not installed
    Security,
}

impl BuiltinStage {
    /// All stages in the order the pipeline runs them.
    pub const ORDER: [BuiltinStage; 5] = [
        BuiltinStage::Yaml,
        BuiltinStage::Lint,
        BuiltinStage::Format,
        BuiltinStage::Tests,
        BuiltinStage::Security,
    ];

    /// Check name used in the summary.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinStage::Yaml => "yaml",
            BuiltinStage::Lint => "lint",
            BuiltinStage::Format => "format",
            BuiltinStage::Tests => "tests",
            BuiltinStage::Security => "security",
        }
    }

    /// Banner text printed before the stage runs.
    pub fn description(&self) -> &'static str {
        match self {
            BuiltinStage::Yaml => "Validating GitHub Actions YAML files",
            BuiltinStage::Lint => "Running PyLint code analysis",
            BuiltinStage::Format => "Checking code formatting with Black (informational)",
            BuiltinStage::Tests => "Running all tests with coverage",
            BuiltinStage::Security => "Running Bandit security scan",
        }
    }

    pub fn policy(&self) -> StagePolicy {
        match self {
            BuiltinStage::Yaml | BuiltinStage::Lint => StagePolicy::Recorded,
            BuiltinStage::Format => StagePolicy::Informational,
            BuiltinStage::Tests => StagePolicy::Fatal,
            BuiltinStage::Security => StagePolicy::Optional,
        }
    }
}

/// How a stage's outcome feeds into the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StagePolicy {
    /// Recorded; failure does not stop the run.
    Recorded,

    /// Shown but never recorded and never affects the exit code.
    Informational,

    /// Recorded; failure aborts the run immediately.
    Fatal,

    /// Recorded; a missing executable skips the stage with a warning.
    Optional,
}

impl StagePolicy {
    /// Whether the outcome goes into the check results.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, StagePolicy::Informational)
    }

    /// The `exit_on_error` flag of the stage.
    pub fn exit_on_error(&self) -> bool {
        matches!(self, StagePolicy::Fatal)
    }
}

/// What a stage actually does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageAction {
    /// Run an external command (first element is the executable).
    Command(Vec<String>),

    /// Parse each file as YAML, relative to the workspace.
    ValidateYaml(Vec<PathBuf>),
}

/// Configuration for a CI stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Check name, unique within a run.
    pub name: String,

    /// Human-readable banner text.
    pub description: String,

    pub action: StageAction,

    /// Command the user can run to fix what the stage reports.
    pub fix_command: Option<Vec<String>>,

    pub policy: StagePolicy,
}

impl StageConfig {
    /// Create a stage configuration for a builtin stage.
    pub fn from_builtin(stage: BuiltinStage, action: StageAction) -> Self {
        Self {
            name: stage.name().to_string(),
            description: stage.description().to_string(),
            action,
            fix_command: None,
            policy: stage.policy(),
        }
    }

    /// Create a custom command stage.
    ///
    /// Not produced by [`crate::config::CiConfig`]; used to drive the
    /// pipeline with arbitrary commands.
    pub fn custom(name: String, command: Vec<String>, policy: StagePolicy) -> Self {
        Self {
            description: name.clone(),
            name,
            action: StageAction::Command(command),
            fix_command: None,
            policy,
        }
    }

    /// Attach a fix hint.
    pub fn with_fix_command(mut self, fix: Vec<String>) -> Self {
        self.fix_command = Some(fix);
        self
    }
}
