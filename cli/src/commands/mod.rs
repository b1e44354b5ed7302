//! Command implementations

pub mod install;
pub mod load;
pub mod print;
pub mod reload;
pub mod status;
pub mod uninstall;
pub mod unload;
pub mod version;

use clap::Args;

/// Arguments for the install command.
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Load the agent (overriding a disabled state) once installed
    #[arg(long)]
    pub load: bool,
}

/// Arguments for the load command.
#[derive(Args, Debug, Default)]
pub struct LoadArgs {
    /// Load even if the agent was disabled (launchctl load -w)
    #[arg(short = 'w', long)]
    pub force: bool,
}

/// Arguments for the unload command.
#[derive(Args, Debug, Default)]
pub struct UnloadArgs {
    /// Disable the agent so it is not started again (launchctl unload -w)
    #[arg(short = 'w', long)]
    pub disable: bool,
}
