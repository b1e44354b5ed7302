//! `agentctl unload`: stop launchd from managing the agent.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::commands::UnloadArgs;
use crate::output::Renderer;
use crate::output::json::{JobAction, JobReport};

/// Run `agentctl unload`.
///
/// # Errors
///
/// Returns an error if launchctl cannot be run or reports failure.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
    args: &UnloadArgs,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    let output = controller.unload(args.disable).await?;
    renderer.render_job(&JobReport {
        label: &controller.environment().label,
        action: if args.disable {
            JobAction::Disabled
        } else {
            JobAction::Unloaded
        },
        output: &output,
    })
}
