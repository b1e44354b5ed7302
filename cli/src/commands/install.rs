//! `agentctl install`: write the descriptor into the LaunchAgents directory.

use anyhow::Result;

use crate::application::ports::{AgentPaths, DescriptorStore, ServiceManager};
use crate::application::services::controller::ServiceController;
use crate::commands::InstallArgs;
use crate::output::Renderer;
use crate::output::json::InstallReport;

/// Run `agentctl install`.
///
/// With `--load`, a failed install aborts before anything is loaded.
///
/// # Errors
///
/// Returns an error if rendering or writing fails, or if `--load` fails.
pub async fn run<M, S, P>(
    renderer: &Renderer<'_>,
    controller: &ServiceController<M, S, P>,
    args: &InstallArgs,
) -> Result<()>
where
    M: ServiceManager,
    S: DescriptorStore,
    P: AgentPaths,
{
    controller.install_agent().await?;
    let path = controller.descriptor_path()?;
    let load_output = if args.load {
        Some(controller.load(true).await?)
    } else {
        None
    };

    renderer.render_install(&InstallReport {
        label: &controller.environment().label,
        path: &path,
        load_output: load_output.as_deref(),
    })
}
