//! CI gate evaluation for pass/fail criteria.

use crate::pipeline::CheckResults;
use serde::{Deserialize, Serialize};

/// Gate evaluation verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateVerdict {
    /// Whether the gate passed.
    pub passed: bool,

    /// Violations that caused failure (empty if passed).
    pub violations: Vec<String>,

    /// Summary message.
    pub message: String,
}

/// CI gate evaluation rules.
pub struct CiGate;

impl CiGate {
    /// Evaluate whether every recorded check passed.
    ///
    /// Informational stages never reach [`CheckResults`], so they cannot
    /// fail the gate. An empty result set passes.
    pub fn evaluate(checks: &CheckResults) -> GateVerdict {
        let violations: Vec<String> = checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| format!("Check '{}' failed", check.name))
            .collect();

        let passed = violations.is_empty();
        let message = if passed {
            "All checks passed".to_string()
        } else {
            format!("Gate failed with {} violation(s)", violations.len())
        };

        GateVerdict {
            passed,
            violations,
            message,
        }
    }
}
