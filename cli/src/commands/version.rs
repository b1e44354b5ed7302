//! `agentctl version`

use anyhow::Result;

use crate::output::Renderer;
use crate::output::json::VersionReport;

const REPORT: VersionReport = VersionReport {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Print the package version. Needs no environment file.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(renderer: &Renderer<'_>) -> Result<()> {
    renderer.render_version(&REPORT)
}
