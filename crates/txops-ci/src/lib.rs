//! txops CI - local continuous integration checks
//!
//! Runs the same checks as the hosted workflows, in a fixed order:
//! - YAML syntax of the workflow files
//! - pylint (non-blocking)
//! - black --check (informational)
//! - pytest with coverage (fatal on failure)
//! - bandit (skipped when not installed)

pub mod config;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod stage;
pub mod yaml;

// Re-export key types
pub use config::CiConfig;
pub use error::CiError;
pub use gate::{CiGate, GateVerdict};
pub use pipeline::{AbortedStage, CheckOutcome, CheckResults, CiPipeline, PipelineResult};
pub use report::{render_summary, write_json_report};
pub use runner::{CiRunner, StageResult};
pub use stage::{BuiltinStage, StageAction, StageConfig, StagePolicy};
