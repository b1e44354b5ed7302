//! `ServiceController`: one launchd agent, rendered from one Environment.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//!
//! Every public operation takes the per-controller operation lock, so calls on
//! the same controller run one at a time. Nothing is retried and partial
//! effects are not rolled back.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::ports::{AgentPaths, DescriptorStore, Job, ServiceManager};
use crate::domain::{
    Environment, ExecutionResult, InstallState, LaunchError, StatusResult, pid_for_label,
    render_descriptor,
};

/// Facade over the service manager for the job described by `environment`.
pub struct ServiceController<M, S, P> {
    environment: Arc<Environment>,
    manager: M,
    store: S,
    paths: P,
    op_lock: Mutex<()>,
}

impl<M, S, P> ServiceController<M, S, P>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    /// Build a controller. Performs no I/O.
    pub fn new(environment: Arc<Environment>, manager: M, store: S, paths: P) -> Self {
        Self {
            environment,
            manager,
            store,
            paths,
            op_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Render the descriptor for this controller's environment.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if the environment is invalid.
    pub fn render_descriptor(&self) -> Result<String, LaunchError> {
        render_descriptor(&self.environment)
    }

    /// Install path: `<launch agents dir>/<label>.plist`.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if the label is invalid or the
    /// directory cannot be resolved.
    pub fn descriptor_path(&self) -> Result<PathBuf, LaunchError> {
        let file_name = self.environment.descriptor_file_name()?;
        Ok(self.paths.launch_agents_dir()?.join(file_name))
    }

    fn job(&self) -> Result<Job, LaunchError> {
        Ok(Job {
            label: self.environment.label.clone(),
            descriptor: self.descriptor_path()?,
        })
    }

    /// Load the job (`launchctl load`, with `-w` when `force`).
    ///
    /// # Errors
    ///
    /// Returns `ProcessInvocation` if the tool cannot be run and
    /// `ServiceManager` if it reports failure.
    pub async fn load(&self, force: bool) -> ExecutionResult {
        let _guard = self.op_lock.lock().await;
        self.load_locked(force).await
    }

    /// Unload the job (`launchctl unload`, with `-w` when `disable`).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::load`].
    pub async fn unload(&self, disable: bool) -> ExecutionResult {
        let _guard = self.op_lock.lock().await;
        self.unload_locked(disable).await
    }

    /// Unload, then load, then report the job's pid.
    ///
    /// A failing unload aborts the reload before load is attempted and its
    /// error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn reload(&self) -> StatusResult {
        let _guard = self.op_lock.lock().await;
        tracing::info!(label = %self.environment.label, "reloading agent");
        self.unload_locked(false).await?;
        self.load_locked(false).await?;
        self.status_locked().await
    }

    /// Running pid of the job; `Ok(None)` when it is not running.
    ///
    /// # Errors
    ///
    /// Returns an error only if the service manager cannot be queried.
    pub async fn status(&self) -> StatusResult {
        let _guard = self.op_lock.lock().await;
        self.status_locked().await
    }

    /// Render the descriptor and write it to the install path.
    ///
    /// Rendering happens first; a rendering failure writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if rendering fails and `Io` if the
    /// descriptor cannot be written.
    pub async fn install_agent(&self) -> Result<(), LaunchError> {
        let _guard = self.op_lock.lock().await;
        let plist = self.render_descriptor()?;
        let path = self.descriptor_path()?;
        self.store.write(&path, &plist).await?;
        tracing::info!(
            label = %self.environment.label,
            path = %path.display(),
            "installed agent"
        );
        Ok(())
    }

    /// Remove the installed descriptor. Does not unload the job.
    ///
    /// Returns `true` if a descriptor was removed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be removed.
    pub async fn uninstall_agent(&self) -> Result<bool, LaunchError> {
        let _guard = self.op_lock.lock().await;
        let path = self.descriptor_path()?;
        let removed = self.store.remove(&path).await?;
        if removed {
            tracing::info!(
                label = %self.environment.label,
                path = %path.display(),
                "removed agent"
            );
        }
        Ok(removed)
    }

    /// Compare the installed descriptor with the current rendering.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorGeneration` if rendering fails and `Io` if the
    /// installed file cannot be read.
    pub async fn install_state(&self) -> Result<InstallState, LaunchError> {
        let _guard = self.op_lock.lock().await;
        let plist = self.render_descriptor()?;
        let path = self.descriptor_path()?;
        Ok(match self.store.read(&path).await? {
            None => InstallState::Missing,
            Some(installed) if installed == plist => InstallState::Current,
            Some(_) => InstallState::Stale,
        })
    }

    async fn load_locked(&self, force: bool) -> ExecutionResult {
        let job = self.job()?;
        tracing::info!(label = %job.label, force, "loading agent");
        self.manager.load(&job, force).await
    }

    async fn unload_locked(&self, disable: bool) -> ExecutionResult {
        let job = self.job()?;
        tracing::info!(label = %job.label, disable, "unloading agent");
        self.manager.unload(&job, disable).await
    }

    async fn status_locked(&self) -> StatusResult {
        let jobs = self.manager.list().await?;
        let pid = pid_for_label(&jobs, &self.environment.label);
        tracing::debug!(label = %self.environment.label, ?pid, "queried agent status");
        Ok(pid)
    }
}
