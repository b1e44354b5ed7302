//! `agentctl uninstall`: remove the installed descriptor.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::output::Renderer;
use crate::output::json::UninstallReport;

/// Run `agentctl uninstall`.
///
/// # Errors
///
/// Returns an error if the descriptor exists but cannot be removed.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let path = controller.descriptor_path()?;
    let removed = controller.uninstall_agent().await?;
    renderer.render_uninstall(&UninstallReport {
        label: &controller.environment().label,
        path: &path,
        removed,
    })
}
