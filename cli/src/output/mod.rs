//! Terminal and JSON output.

pub mod human;
pub mod json;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::{OwoColorize as _, Style};

pub use human::HumanRenderer;
pub use json::JsonRenderer;
use json::{
    DescriptorReport, InstallReport, JobReport, ReloadReport, StatusReport, UninstallReport,
    VersionReport,
};
pub use styles::Styles;

/// Output mode selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    #[default]
    Human,
    /// Machine-readable JSON output.
    Json,
}

impl OutputMode {
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// One renderer per output mode. Command handlers render through this and
/// never look at the mode themselves.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(mode: OutputMode, ctx: &'a OutputContext) -> Self {
        match mode {
            OutputMode::Human => Self::Human(HumanRenderer::new(ctx)),
            OutputMode::Json => Self::Json(JsonRenderer),
        }
    }
}

/// Human variant prints, JSON variant serializes the report.
macro_rules! render_methods {
    ($($method:ident($report:ty);)*) => {
        impl Renderer<'_> {
            $(
                /// # Errors
                ///
                /// Returns an error if JSON serialization fails.
                pub fn $method(&self, report: &$report) -> Result<()> {
                    match self {
                        Self::Human(human) => {
                            human.$method(report);
                            Ok(())
                        }
                        Self::Json(json) => json.render(report),
                    }
                }
            )*
        }
    };
}

render_methods! {
    render_descriptor(DescriptorReport<'_>);
    render_install(InstallReport<'_>);
    render_uninstall(UninstallReport<'_>);
    render_job(JobReport<'_>);
    render_reload(ReloadReport<'_>);
    render_status(StatusReport<'_>);
    render_version(VersionReport);
}

/// Where and how command results are printed. Everything goes to stdout and
/// is suppressed by `quiet`; errors are printed by `main`.
pub struct OutputContext {
    pub styles: Styles,
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a terminal and only without `no_color`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let styles = if !no_color && Term::stdout().is_term() {
            Styles::colored()
        } else {
            Styles::PLAIN
        };
        Self { styles, quiet }
    }

    fn mark(&self, mark: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", mark.style(style));
        }
    }

    pub fn success(&self, msg: &str) {
        self.mark("✓", self.styles.ok, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.mark("⚠", self.styles.attention, msg);
    }

    pub fn info(&self, msg: &str) {
        self.mark("ℹ", self.styles.note, msg);
    }

    /// `<action> <label>`, with the label highlighted.
    pub fn job(&self, action: &str, label: &str) {
        self.success(&format!("{action} {}", label.style(self.styles.label)));
    }

    /// Whether the job is running, as shown by `status` and `reload`.
    pub fn job_state(&self, label: &str, pid: Option<u32>) {
        let label = label.style(self.styles.label);
        match pid {
            Some(pid) => self.success(&format!("{label} is running (pid {pid})")),
            None => self.warn(&format!("{label} is not running")),
        }
    }

    /// Aligned `key  value` line with the key muted.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<10}  {value}", key.style(self.styles.muted));
        }
    }

    /// Whatever launchctl printed, indented under the status line.
    pub fn tool_output(&self, text: &str) {
        if self.quiet {
            return;
        }
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            println!("    {}", line.style(self.styles.muted));
        }
    }
}
