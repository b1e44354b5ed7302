//! JSON output helpers for `--json` code paths.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{InstallState, LaunchError, RunMode};

/// `agentctl print --json` payload.
#[derive(Debug, Serialize)]
pub struct DescriptorReport<'a> {
    pub label: &'a str,
    pub descriptor: &'a str,
}

/// `agentctl install --json` payload.
#[derive(Debug, Serialize)]
pub struct InstallReport<'a> {
    pub label: &'a str,
    pub path: &'a Path,
    /// launchctl output, present only when `--load` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_output: Option<&'a str>,
}

/// `agentctl uninstall --json` payload.
#[derive(Debug, Serialize)]
pub struct UninstallReport<'a> {
    pub label: &'a str,
    pub path: &'a Path,
    pub removed: bool,
}

/// What `load` or `unload` did to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Loaded,
    Unloaded,
    Disabled,
}

/// `agentctl load --json` and `agentctl unload --json` payload.
#[derive(Debug, Serialize)]
pub struct JobReport<'a> {
    pub label: &'a str,
    pub action: JobAction,
    pub output: &'a str,
}

/// `agentctl reload --json` payload.
#[derive(Debug, Serialize)]
pub struct ReloadReport<'a> {
    pub label: &'a str,
    pub running: bool,
    pub pid: Option<u32>,
}

/// `agentctl status --json` payload.
#[derive(Debug, Serialize)]
pub struct StatusReport<'a> {
    pub label: &'a str,
    pub run_mode: RunMode,
    pub running: bool,
    pub pid: Option<u32>,
    pub installed: InstallState,
}

/// `agentctl version --json` payload.
#[derive(Debug, Serialize)]
pub struct VersionReport {
    pub name: &'static str,
    pub version: &'static str,
}

/// Prints every payload as one pretty-printed JSON document on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render<T: Serialize>(self, payload: &T) -> Result<()> {
        println!("{}", format(payload)?);
        Ok(())
    }
}

/// Format any serializable payload as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Error code for an arbitrary command failure; `LaunchError`s keep their own.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<LaunchError>()
        .map_or("COMMAND_FAILED", LaunchError::code)
}
