//! `agentctl print`: write the rendered descriptor to stdout.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::output::Renderer;
use crate::output::json::DescriptorReport;

/// Run `agentctl print`.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be rendered.
pub fn run<M, S, P>(renderer: &Renderer<'_>, controller: &ServiceController<M, S, P>) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let plist = controller.render_descriptor()?;
    renderer.render_descriptor(&DescriptorReport {
        label: &controller.environment().label,
        descriptor: &plist,
    })
}
