//! sitedeploy - remote deployment tasks for a single website
//!
//! Brings a fixed set of hosts to a running state by issuing git, shell and
//! process-supervisor commands over SSH, and uploading rendered configuration
//! files with scp. Every operation is a short linear pipeline: the first
//! failing step aborts it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{prompt_parameters, HostStatus, Orchestrator, DEFAULT_MAX_ATTEMPTS};
pub use config::DeployConfig;
pub use domain::{
    Command, CommandSet, ExecutionMode, ParameterSpec, Step, SupervisorKind, TargetEnvironment,
    Template, TemplateContext,
};
pub use error::{DeployError, DeployResult};
