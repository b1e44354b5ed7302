//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod descriptor;
pub mod environment;
pub mod error;
pub mod listing;

pub use descriptor::render_descriptor;
pub use environment::{Environment, RunMode, validate_environment, validate_label};
pub use error::{ConfigError, LaunchError};
pub use listing::{JobListing, parse_job_list, pid_for_label};

/// Outcome of a one-shot load/unload: the tool's captured output.
pub type ExecutionResult = Result<String, LaunchError>;

/// Outcome of a status or reload query: the running process id, if any.
pub type StatusResult = Result<Option<u32>, LaunchError>;

/// How the installed descriptor compares with the current rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    /// No descriptor at the install path.
    Missing,
    /// Installed descriptor matches the current rendering byte for byte.
    Current,
    /// Installed descriptor differs; `install` would overwrite it.
    Stale,
}

impl InstallState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Current => "current",
            Self::Stale => "stale",
        }
    }
}
