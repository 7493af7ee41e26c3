//! Configuration module for sitedeploy
//!
//! Precedence, highest first:
//! 1. CLI flags (`--host`)
//! 2. Environment variables (SITEDEPLOY_*)
//! 3. `deploy.toml`
//! 4. Built-in defaults

mod loader;
mod suggest;
mod types;

pub use loader::ConfigWarning;
pub use types::{
    CommandsConfig, DeployConfig, GitConfig, ParameterConfig, ServiceConfig, SshConfig,
    TargetConfig, TemplatesConfig,
};
