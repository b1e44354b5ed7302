//! `agentctl reload`: unload then load, reporting the new pid.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::output::Renderer;
use crate::output::json::ReloadReport;

/// Run `agentctl reload`.
///
/// # Errors
///
/// Returns the unload error if unloading fails (load is not attempted), or the
/// load/status error otherwise.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let pid = controller.reload().await?;
    renderer.render_reload(&ReloadReport {
        label: &controller.environment().label,
        running: pid.is_some(),
        pid,
    })
}
