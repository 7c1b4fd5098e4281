//! In-process YAML syntax validation.

use serde::de::{Deserialize, IgnoredAny};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A workflow file that could not be validated.
#[derive(Error, Debug)]
pub enum YamlError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Parse every file under `root`, stopping at the first failure.
pub fn validate_yaml_files(root: &Path, files: &[PathBuf]) -> Result<(), YamlError> {
    for file in files {
        let path = root.join(file);
        let content = std::fs::read_to_string(&path).map_err(|source| YamlError::Read {
            path: file.clone(),
            source,
        })?;
        // An empty document is null, not an error.
        if content.trim().is_empty() {
            continue;
        }
        // Syntax only: repeated keys are accepted, the last one wins.
        for document in serde_yaml::Deserializer::from_str(&content) {
            IgnoredAny::deserialize(document).map_err(|source| YamlError::Parse {
                path: file.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
