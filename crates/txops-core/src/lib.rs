//! txops-core: shared plumbing for the txops binaries
//!
//! - [`ExternalCommand`]: run a tool with inherited stdio and typed spawn errors
//! - [`init_tracing`]: one-shot tracing subscriber setup

pub mod error;
pub mod process;
pub mod telemetry;

pub use error::ProcessError;
pub use process::{exit_code, ExternalCommand};
pub use telemetry::{init_tracing, verbosity};
