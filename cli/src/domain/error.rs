//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Launch errors ─────────────────────────────────────────────────────────────

/// Errors surfaced by every service controller operation.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot generate service descriptor: {0}")]
    DescriptorGeneration(String),

    #[error("failed to run {program}: {reason}")]
    ProcessInvocation { program: String, reason: String },

    #[error("'{command}' {}\n{output}", exit_description(.code))]
    ServiceManager {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DescriptorGeneration(_) => "DESCRIPTOR_GENERATION",
            Self::ProcessInvocation { .. } => "PROCESS_INVOCATION",
            Self::ServiceManager { .. } => "SERVICE_MANAGER",
            Self::Io { .. } => "IO",
        }
    }
}

#[allow(clippy::ref_option)] // called from the derived Display impl with a field reference
fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with status {c}"),
        None => "was terminated by a signal".to_string(),
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
