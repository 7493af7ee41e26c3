//! Task entry points
//!
//! Each task loads the configuration once, builds the ssh/scp orchestrator
//! and reports the outcome through `ui::output`.

pub mod deploy;
pub mod setup;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sitedeploy::config::DeployConfig;
use sitedeploy::infrastructure::{ScpTransfer, SshRunner};
use sitedeploy::{Orchestrator, TargetEnvironment};
use tracing::debug;

use crate::cli::Cli;
use crate::ui::output::print_config_warnings;

/// Loaded configuration for one invocation
pub struct Session {
    pub config_path: PathBuf,
    pub config: DeployConfig,
    pub env: TargetEnvironment,
}

impl Session {
    /// Read `--config`, apply env overrides and `--host`, validate
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = &cli.config;
        let (config, warnings) = DeployConfig::load_with_warnings(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        if !cli.json {
            print_config_warnings(path, &warnings);
        }

        let mut config = config.with_env_overrides();
        if !cli.hosts.is_empty() {
            config.target.hosts = cli.hosts.clone();
        }

        let env = config.clone().into_target(path)?;
        debug!(hosts = ?env.hosts, supervisor = %env.supervisor, "configuration loaded");

        Ok(Self {
            config_path: path.clone(),
            config,
            env,
        })
    }

    /// Orchestrator talking to the hosts over ssh and scp
    pub fn orchestrator(&self) -> Orchestrator<SshRunner, ScpTransfer> {
        Orchestrator::new(
            self.env.clone(),
            SshRunner::from_target(&self.env),
            ScpTransfer::from_target(&self.env),
        )
    }
}
