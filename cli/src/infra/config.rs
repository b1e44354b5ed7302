//! Infrastructure implementation of the `EnvironmentStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::EnvironmentStore;
use crate::domain::{Environment, RunMode};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AGENTCTL_CONFIG";

/// Environment variable overriding the configured run mode.
pub const RUN_MODE_ENV: &str = "AGENTCTL_RUN_MODE";

/// Production implementation of `EnvironmentStore` that uses a YAML file on disk.
pub struct YamlEnvironmentStore {
    path: PathBuf,
    run_mode: Option<RunMode>,
    default_log_dir: Option<PathBuf>,
}

impl YamlEnvironmentStore {
    /// Read from `path`; unset log directories default to `~/Library/Logs`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            run_mode: None,
            default_log_dir: dirs::home_dir().map(|h| h.join("Library").join("Logs")),
        }
    }

    /// Use `explicit` if given, otherwise `~/.agentctl/environment.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if no path was given and the home directory cannot be
    /// determined.
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::new(home.join(".agentctl").join("environment.yaml")))
    }

    /// Override whatever run mode the file declares.
    #[must_use]
    pub fn with_run_mode(mut self, run_mode: Option<RunMode>) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// Log directory applied when the file does not set one (`None` leaves it unset).
    #[must_use]
    pub fn with_default_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.default_log_dir = dir;
        self
    }
}

impl EnvironmentStore for YamlEnvironmentStore {
    fn load(&self) -> Result<Environment> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let mut env: Environment = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;

        if let Some(mode) = self.run_mode {
            env.run_mode = mode;
        }
        if env.log_dir.is_none() {
            env.log_dir.clone_from(&self.default_log_dir);
        }
        tracing::debug!(
            path = %self.path.display(),
            label = %env.label,
            run_mode = %env.run_mode,
            "loaded environment"
        );
        Ok(env)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
