//! txops launcher - start the API server with the right environment file
//!
//! Discovers environment profiles in the working directory, resolves the
//! chosen one to a file, exports it as `ENV_FILE` and hands off to the
//! web-server runner.

pub mod cli;
pub mod env;
pub mod error;
pub mod launch;
pub mod server;

pub use cli::{parse_args, LaunchArgs};
pub use env::{EnvironmentDir, ACTIVE_ENV_MARKER, ENV_FILE_VAR};
pub use error::LaunchError;
pub use launch::{launch, LaunchOutcome};
pub use server::{ServeOutcome, ServerOptions};
