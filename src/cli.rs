use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sitedeploy - deploy a website to its hosts over ssh
#[derive(Parser, Debug)]
#[command(name = "sitedeploy")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Hosts, paths and commands are read from deploy.toml. Set RUST_LOG to override log filtering."
)]
pub struct Cli {
    /// Path to the deployment configuration
    #[arg(short, long, default_value = "deploy.toml", global = true)]
    pub config: PathBuf,

    /// Deploy to this host instead of the configured ones (repeatable)
    #[arg(long = "host", value_name = "HOST", global = true)]
    pub hosts: Vec<String>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Show the service status on every host
    Status,

    /// Push the local branch, then update every host
    Deploy,

    /// Stop, pull, migrate, install dependencies and start on every host
    Update,

    /// Prepare fresh hosts: clone, configure, install the service and start it
    #[command(alias = "setup-remote")]
    Setup {
        /// Accept every default instead of prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the dependency command on every host
    InstallDependencies,

    /// Render and upload the configuration files
    Configure {
        /// Accept every default instead of prompting
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Status => "status",
            Commands::Deploy => "deploy",
            Commands::Update => "update",
            Commands::Setup { .. } => "setup",
            Commands::InstallDependencies => "install-dependencies",
            Commands::Configure { .. } => "configure",
        }
    }
}
