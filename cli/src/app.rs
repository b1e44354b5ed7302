//! Application context: wiring of the production controller.
//!
//! `AppContext` is constructed once in `Cli::run()` and handed to every
//! command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::EnvironmentStore;
use crate::application::services::controller::ServiceController;
use crate::domain::RunMode;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlEnvironmentStore;
use crate::infra::fs::{LocalFs, UserLaunchAgents};
use crate::infra::launchctl::Launchctl;
pub use crate::output::OutputMode;
use crate::output::{OutputContext, Renderer};

/// The controller as wired for a real macOS host.
pub type LaunchdController =
    ServiceController<Launchctl<TokioCommandRunner>, LocalFs, UserLaunchAgents>;

/// Output rendering flags.
pub struct OutputFlags {
    /// Output in JSON format.
    pub json: bool,
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Where the environment and collaborators come from.
pub struct SourceFlags {
    /// Explicit config file; `~/.agentctl/environment.yaml` when unset.
    pub config: Option<PathBuf>,
    /// Run mode overriding the config file.
    pub run_mode: Option<RunMode>,
    /// Override for `~/Library/LaunchAgents`.
    pub launch_agents_dir: Option<PathBuf>,
    /// launchctl binary to invoke.
    pub launchctl: String,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Human or JSON output.
    pub mode: OutputMode,
    /// Controller for the configured agent.
    pub controller: LaunchdController,
}

impl AppContext {
    /// Load the environment and build the production controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be loaded.
    pub fn new(output: &OutputFlags, sources: SourceFlags) -> Result<Self> {
        let store =
            YamlEnvironmentStore::locate(sources.config)?.with_run_mode(sources.run_mode);
        let environment = Arc::new(store.load()?);

        let controller = ServiceController::new(
            environment,
            Launchctl::with_program(TokioCommandRunner::default(), sources.launchctl),
            LocalFs,
            UserLaunchAgents::new(sources.launch_agents_dir),
        );

        Ok(Self {
            output: OutputContext::new(output.no_color, output.quiet),
            mode: OutputMode::from_json_flag(output.json),
            controller,
        })
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(self.mode, &self.output)
    }
}
