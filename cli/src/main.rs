//! agentctl - render, install and control a per-user launchd agent

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use agentctl::output::json;
use cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let as_json = cli.json;
    if let Err(e) = cli.run().await {
        if as_json {
            if let Ok(obj) = json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                println!("{obj}");
            }
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
