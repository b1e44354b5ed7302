//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use agentctl::app::{AppContext, OutputFlags, OutputMode, SourceFlags};
use agentctl::commands;
use agentctl::domain::RunMode;
use agentctl::infra::config::{CONFIG_ENV, RUN_MODE_ENV};
use agentctl::infra::launchctl::LAUNCHCTL;
use agentctl::output::{OutputContext, Renderer};

/// Render, install and control a per-user launchd agent
#[derive(Parser)]
#[command(
    name = "agentctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` other than `0`/`false`)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Environment file describing the agent
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run mode exported to the agent (prod, staging, devel)
    #[arg(long, global = true, env = RUN_MODE_ENV)]
    pub run_mode: Option<RunMode>,

    #[arg(long, global = true, hide = true, env = "AGENTCTL_LAUNCH_AGENTS_DIR")]
    pub launch_agents_dir: Option<PathBuf>,

    #[arg(long, global = true, hide = true, env = "AGENTCTL_LAUNCHCTL", default_value = LAUNCHCTL)]
    pub launchctl: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the rendered launchd descriptor
    Print,

    /// Write the descriptor into ~/Library/LaunchAgents
    Install(commands::InstallArgs),

    /// Remove the installed descriptor
    Uninstall,

    /// Load the agent into launchd
    Load(commands::LoadArgs),

    /// Unload the agent from launchd
    Unload(commands::UnloadArgs),

    /// Unload then load the agent
    Reload,

    /// Show whether the agent is installed and running
    Status,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            run_mode,
            launch_agents_dir,
            launchctl,
            command,
        } = self;

        if matches!(command, Command::Version) {
            let output = OutputContext::new(no_color, quiet);
            let renderer = Renderer::new(OutputMode::from_json_flag(json), &output);
            return commands::version::run(&renderer);
        }

        let app = AppContext::new(
            &OutputFlags {
                json,
                no_color,
                quiet,
            },
            SourceFlags {
                config,
                run_mode,
                launch_agents_dir,
                launchctl,
            },
        )?;
        let renderer = &app.renderer();
        let controller = &app.controller;

        match command {
            Command::Print => commands::print::run(renderer, controller),
            Command::Install(args) => commands::install::run(renderer, controller, &args).await,
            Command::Uninstall => commands::uninstall::run(renderer, controller).await,
            Command::Load(args) => commands::load::run(renderer, controller, &args).await,
            Command::Unload(args) => commands::unload::run(renderer, controller, &args).await,
            Command::Reload => commands::reload::run(renderer, controller).await,
            Command::Status => commands::status::run(renderer, controller).await,
            Command::Version => Ok(()),
        }
    }
}
