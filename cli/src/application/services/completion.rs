//! Callback-style completions over the async controller operations.
//!
//! Each `spawn_*` method moves the operation onto the tokio runtime and
//! invokes `completion` exactly once with the outcome. The returned handle
//! may be dropped; the operation still runs to completion.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::domain::{ExecutionResult, LaunchError, StatusResult};

impl<M, S, P> ServiceController<M, S, P>
where
    M: ServiceManager + Send + Sync + 'static,
    S: DescriptorStore + Send + Sync + 'static,
    P: AgentPaths + Send + Sync + 'static,
{
    /// [`ServiceController::load`] with a completion callback.
    pub fn spawn_load<F>(self: &Arc<Self>, force: bool, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(ExecutionResult) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { completion(this.load(force).await) })
    }

    /// [`ServiceController::unload`] with a completion callback.
    pub fn spawn_unload<F>(self: &Arc<Self>, disable: bool, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(ExecutionResult) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { completion(this.unload(disable).await) })
    }

    /// [`ServiceController::reload`] with a completion callback.
    pub fn spawn_reload<F>(self: &Arc<Self>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(StatusResult) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { completion(this.reload().await) })
    }

    /// [`ServiceController::status`] with a completion callback.
    pub fn spawn_status<F>(self: &Arc<Self>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(StatusResult) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { completion(this.status().await) })
    }

    /// [`ServiceController::install_agent`] with a completion callback.
    pub fn spawn_install_agent<F>(self: &Arc<Self>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<(), LaunchError>) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move { completion(this.install_agent().await) })
    }
}
