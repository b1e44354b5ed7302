//! `agentctl status`: is the agent installed, and is it running?

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::output::Renderer;
use crate::output::json::StatusReport;

/// Run `agentctl status`.
///
/// # Errors
///
/// Returns an error if launchd cannot be queried or the installed descriptor
/// cannot be inspected.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let environment = controller.environment();
    let installed = controller.install_state().await?;
    let pid = controller.status().await?;

    renderer.render_status(&StatusReport {
        label: &environment.label,
        run_mode: environment.run_mode,
        running: pid.is_some(),
        pid,
        installed,
    })
}
