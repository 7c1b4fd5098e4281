//! External command execution with inherited stdio.
//!
//! Both binaries hand the terminal straight to the tools they drive, so
//! nothing here captures output: the child writes to the same stdout/stderr
//! as the parent and only its exit status comes back.

use crate::error::ProcessError;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};
use tracing::debug;

/// An external command: executable, arguments, working directory and any
/// extra environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl ExternalCommand {
    /// Create a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Build a command from an argv vector (first element is the executable).
    ///
    /// `label` names the command in the error when `argv` is empty.
    pub fn from_argv(label: &str, argv: &[String]) -> Result<Self, ProcessError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ProcessError::EmptyCommand(label.to_string()))?;
        Ok(Self::new(program.clone()).args(args.iter().cloned()))
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command in `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an environment variable for the child only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// Shell-like rendering for banners and logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Start the command without waiting for it.
    pub fn spawn(&self) -> Result<Child, ProcessError> {
        debug!(command = %self.display(), "Spawning external command");
        self.to_command()
            .spawn()
            .map_err(|e| ProcessError::from_spawn(&self.program, e))
    }

    /// Run the command to completion and return its exit status.
    pub async fn status(&self) -> Result<ExitStatus, ProcessError> {
        let mut child = self.spawn()?;
        child.wait().await.map_err(|source| ProcessError::Io {
            program: self.program.clone(),
            source,
        })
    }
}

/// Exit code of a finished process; `-1` when it was killed by a signal.
pub fn exit_code(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
