//! `agentctl load`: hand the installed descriptor to launchd.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::commands::LoadArgs;
use crate::output::Renderer;
use crate::output::json::{JobAction, JobReport};

/// Run `agentctl load`.
///
/// # Errors
///
/// Returns an error if launchctl cannot be run or reports failure.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
    args: &LoadArgs,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let output = controller.load(args.force).await?;
    renderer.render_job(&JobReport {
        label: &controller.environment().label,
        action: JobAction::Loaded,
        output: &output,
    })
}
