//! Error types for txops-ci

use std::path::PathBuf;
use thiserror::Error;

/// Errors outside the check outcomes themselves
#[derive(Error, Debug)]
pub enum CiError {
    /// Writing the JSON report failed
    #[error("cannot write report to {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the report failed
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
