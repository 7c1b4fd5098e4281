//! Error types for external process execution

use thiserror::Error;

/// Errors raised while starting or waiting on an external command.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The argv was empty
    #[error("command for '{0}' is empty")]
    EmptyCommand(String),

    /// The executable could not be found on PATH
    #[error("'{program}' is not installed or not in PATH")]
    NotFound {
        /// Executable that was looked up
        program: String,
    },

    /// Spawning or waiting failed for any other reason
    #[error("failed to run '{program}': {source}")]
    Io {
        /// Executable being run
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// Classify an I/O error from spawning `program`.
    pub fn from_spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProcessError::NotFound {
                program: program.to_string(),
            }
        } else {
            ProcessError::Io {
                program: program.to_string(),
                source,
            }
        }
    }

    /// Whether this error means the tool is simply not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_is_classified() {
        let err = ProcessError::from_spawn("bandit", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "'bandit' is not installed or not in PATH");
    }

    #[test]
    fn test_permission_denied_is_not_not_found() {
        let err = ProcessError::from_spawn(
            "bandit",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("failed to run 'bandit'"));
    }
}
