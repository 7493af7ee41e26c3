//! sitedeploy CLI
//!
//! Usage: sitedeploy [--config deploy.toml] [--host HOST]... <TASK>
//!
//! Tasks:
//!   status                Show the service status on every host
//!   deploy                Push, then update every host
//!   update                Stop, pull, migrate, install dependencies, start
//!   setup                 Prepare fresh hosts (alias: setup-remote)
//!   install-dependencies  Run the dependency command
//!   configure             Render and upload the configuration files

use std::process::ExitCode;

use anyhow::Result;
use sitedeploy::DeployError;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::output::print_failure(cli.command.name(), &err, cli.json);
            ExitCode::from(failure_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let session = commands::Session::load(cli)?;

    match cli.command {
        Commands::Status => commands::status::cmd_status(session, cli.json),
        Commands::Deploy => commands::deploy::cmd_deploy(session, cli.json),
        Commands::Update => commands::deploy::cmd_update(session, cli.json),
        Commands::InstallDependencies => {
            commands::deploy::cmd_install_dependencies(session, cli.json)
        }
        Commands::Setup { yes } => commands::setup::cmd_setup(session, yes, cli.json),
        Commands::Configure { yes } => commands::setup::cmd_configure(session, yes, cli.json),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level
/// Exit status of the first failing command, or 1 when no command failed
fn failure_code(err: &anyhow::Error) -> u8 {
    let status = match err.downcast_ref::<DeployError>().map(DeployError::root) {
        Some(DeployError::Execution {
            status: Some(status),
            ..
        }) => *status,
        _ => 1,
    };
    u8::try_from(status).ok().filter(|code| *code != 0).unwrap_or(1)
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "sitedeploy=info,warn",
        1 => "sitedeploy=debug,warn",
        _ => "sitedeploy=trace,info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
