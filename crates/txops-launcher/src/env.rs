//! Environment discovery and resolution.
//!
//! An environment profile is backed by one file in the working directory:
//! `config.<name>.env`, `.env.<name>`, or `.env` for the `default` profile.

use crate::error::LaunchError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File the `default` profile always maps to.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variable the API reads to find its configuration file.
pub const ENV_FILE_VAR: &str = "ENV_FILE";

/// Marker recording the file the last launch selected.
pub const ACTIVE_ENV_MARKER: &str = ".active_env";

/// Profile used when `--env` is not given, and the only choice offered
/// when nothing is discovered.
pub const FALLBACK_ENVIRONMENT: &str = "local";

/// Conventional dotfiles and the label each contributes when present.
const DOTFILE_LABELS: [(&str, &str); 3] = [
    (".env", "default"),
    (".env.local", "local"),
    (".env.production", "production"),
];

/// `<name>` from `config.<name>.env`, if the file name has that shape.
fn profile_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix("config.")?
        .strip_suffix(".env")
        .filter(|name| !name.is_empty())
}

/// A directory holding environment configuration files.
#[derive(Debug, Clone)]
pub struct EnvironmentDir {
    root: PathBuf,
}

impl EnvironmentDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The process working directory.
    pub fn current() -> Result<Self, LaunchError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative: &Path) -> bool {
        self.root.join(relative).is_file()
    }

    /// Every profile name available in the directory, sorted and distinct.
    ///
    /// Rescans on every call.
    pub fn get_available_environments(&self) -> Result<BTreeSet<String>, LaunchError> {
        let mut names = BTreeSet::new();

        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(profile_name)
            {
                names.insert(name.to_string());
            }
        }

        for (file, label) in DOTFILE_LABELS {
            if self.exists(Path::new(file)) {
                names.insert(label.to_string());
            }
        }

        debug!(root = %self.root.display(), environments = ?names, "Discovered environments");
        Ok(names)
    }

    /// Values `--env` may take: the discovered names, or the fallback alone.
    pub fn allowed_environments(&self) -> Result<Vec<String>, LaunchError> {
        let names = self.get_available_environments()?;
        if names.is_empty() {
            Ok(vec![FALLBACK_ENVIRONMENT.to_string()])
        } else {
            Ok(names.into_iter().collect())
        }
    }

    /// Map a profile name to its file, relative to the directory.
    ///
    /// `default` is always `.env`. Any other name prefers
    /// `config.<name>.env` and falls back to `.env.<name>`.
    pub fn get_env_file_path(&self, name: &str) -> Result<PathBuf, LaunchError> {
        if name == "default" {
            return Ok(PathBuf::from(DEFAULT_ENV_FILE));
        }

        let candidates = vec![
            PathBuf::from(format!("config.{}.env", name)),
            PathBuf::from(format!(".env.{}", name)),
        ];
        match candidates.iter().find(|c| self.exists(c)) {
            Some(found) => Ok(found.clone()),
            None => Err(LaunchError::EnvFileNotFound {
                name: name.to_string(),
                candidates,
            }),
        }
    }

    /// Number of entries in an environment file.
    pub fn count_entries(&self, env_file: &Path) -> Result<usize, dotenvy::Error> {
        let mut count = 0;
        for item in dotenvy::from_path_iter(self.root.join(env_file))? {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Record `env_file` in the `.active_env` marker.
    pub fn write_active_marker(&self, env_file: &Path) -> Result<(), LaunchError> {
        std::fs::write(
            self.root.join(ACTIVE_ENV_MARKER),
            format!("{}\n", env_file.display()),
        )?;
        Ok(())
    }
}
