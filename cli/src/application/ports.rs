//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.
//!
//! Async ports return `Send` futures so controller operations can be moved
//! onto the tokio runtime by the completion adapters.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{Environment, JobListing, LaunchError};

// ── Value Types ───────────────────────────────────────────────────────────────

/// A job as the service manager addresses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub label: String,
    /// Installed descriptor path passed to `load`/`unload`.
    pub descriptor: PathBuf,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
pub trait CommandRunner {
    /// Run a program and capture its output using the runner's default timeout.
    fn run(&self, program: &str, args: &[&str]) -> impl Future<Output = Result<Output>> + Send;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> impl Future<Output = Result<Output>> + Send;
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// The host service manager's job registry (launchd).
pub trait ServiceManager {
    /// Start managing the job. `force` overrides a previously disabled state.
    fn load(
        &self,
        job: &Job,
        force: bool,
    ) -> impl Future<Output = Result<String, LaunchError>> + Send;

    /// Stop managing the job. `disable` keeps it from being loaded again
    /// without `force`.
    fn unload(
        &self,
        job: &Job,
        disable: bool,
    ) -> impl Future<Output = Result<String, LaunchError>> + Send;

    /// Every job currently loaded in the user's domain.
    fn list(&self) -> impl Future<Output = Result<Vec<JobListing>, LaunchError>> + Send;
}

// ── Filesystem and Path Ports ─────────────────────────────────────────────────

/// Reads and writes installed descriptors.
pub trait DescriptorStore {
    /// Write `contents` to `path`, creating the parent directory and
    /// replacing any existing file.
    fn write(&self, path: &Path, contents: &str)
    -> impl Future<Output = Result<(), LaunchError>> + Send;

    /// Read the descriptor at `path`; `None` if there is no file.
    fn read(&self, path: &Path) -> impl Future<Output = Result<Option<String>, LaunchError>> + Send;

    /// Remove the descriptor at `path`; `false` if there was no file.
    fn remove(&self, path: &Path) -> impl Future<Output = Result<bool, LaunchError>> + Send;
}

/// Abstracts the per-user job definition directory.
pub trait AgentPaths {
    /// Directory launchd scans for per-user agents (`~/Library/LaunchAgents`).
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if the directory cannot be resolved.
    fn launch_agents_dir(&self) -> Result<PathBuf, LaunchError>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Supplies the Environment the controller is built from.
pub trait EnvironmentStore {
    /// Load the environment, applying defaults and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or cannot be parsed.
    fn load(&self) -> Result<Environment>;

    /// Where the environment is read from.
    fn path(&self) -> &Path;
}
