//! Error types for txops-launcher

use std::path::PathBuf;
use thiserror::Error;
use txops_core::ProcessError;

/// Errors that can occur while resolving configuration or serving
#[derive(Error, Debug)]
pub enum LaunchError {
    /// No configuration file exists for the requested environment
    #[error("environment file for '{name}' not found (looked for {})", display_candidates(.candidates))]
    EnvFileNotFound {
        name: String,
        candidates: Vec<PathBuf>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The web-server runner could not be started
    #[error(transparent)]
    Process(#[from] ProcessError),
}

pub(crate) fn display_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_candidates() {
        let err = LaunchError::EnvFileNotFound {
            name: "staging".to_string(),
            candidates: vec![
                PathBuf::from("config.staging.env"),
                PathBuf::from(".env.staging"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "environment file for 'staging' not found (looked for config.staging.env, .env.staging)"
        );
    }
}
