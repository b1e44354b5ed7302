//! Human-readable terminal renderer.

use crate::domain::InstallState;
use crate::output::OutputContext;
use crate::output::json::{
    DescriptorReport, InstallReport, JobAction, JobReport, ReloadReport, StatusReport,
    UninstallReport, VersionReport,
};

/// Renders command results as terminal lines through `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// The raw plist. It is the payload, so `--quiet` does not suppress it.
    #[allow(clippy::unused_self)]
    pub fn render_descriptor(&self, report: &DescriptorReport<'_>) {
        print!("{}", report.descriptor);
    }

    pub fn render_install(&self, report: &InstallReport<'_>) {
        self.ctx.success(&format!("Installed {}", report.path.display()));
        if let Some(output) = report.load_output {
            self.ctx.tool_output(output);
            self.ctx.job("Loaded", report.label);
        }
    }

    pub fn render_uninstall(&self, report: &UninstallReport<'_>) {
        let path = report.path.display();
        if report.removed {
            self.ctx.success(&format!("Removed {path}"));
        } else {
            self.ctx.info(&format!("Nothing installed at {path}"));
        }
    }

    pub fn render_job(&self, report: &JobReport<'_>) {
        self.ctx.tool_output(report.output);
        match report.action {
            JobAction::Loaded => self.ctx.job("Loaded", report.label),
            JobAction::Unloaded => self.ctx.job("Unloaded", report.label),
            JobAction::Disabled => {
                self.ctx.job("Unloaded and disabled", report.label);
                self.ctx.info("Re-enable: agentctl load --force");
            }
        }
    }

    pub fn render_reload(&self, report: &ReloadReport<'_>) {
        self.ctx.job("Reloaded", report.label);
        self.ctx.job_state(report.label, report.pid);
    }

    /// Run mode, descriptor state and job state, plus a hint when the
    /// descriptor is missing or out of date.
    pub fn render_status(&self, report: &StatusReport<'_>) {
        self.ctx.kv("run mode", report.run_mode.as_str());
        self.ctx.kv("descriptor", report.installed.as_str());
        self.ctx.job_state(report.label, report.pid);
        match report.installed {
            InstallState::Missing => self.ctx.info("Install: agentctl install"),
            InstallState::Stale => self.ctx.warn(
                "Installed descriptor is out of date. Run: agentctl install && agentctl reload",
            ),
            InstallState::Current => {}
        }
    }

    #[allow(clippy::unused_self)]
    pub fn render_version(&self, report: &VersionReport) {
        println!("{} {}", report.name, report.version);
    }
}
