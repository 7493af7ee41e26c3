//! Application Layer
//!
//! Operations that sequence domain commands through the infrastructure
//! ports. This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT decide what a command looks like (that is `CommandSet`)
//! - Owns ordering, failure reporting and parameter collection
//!
//! ## Operations
//!
//! - `Orchestrator` - status, deploy, update, setup, install_dependencies,
//!   configure, setup_supervisor, render_and_upload
//! - `prompt_parameters` - validated interactive input

pub mod orchestrator;
pub mod parameters;

pub use orchestrator::{HostStatus, Orchestrator, StepTracker};
pub use parameters::{prompt_parameters, DEFAULT_MAX_ATTEMPTS};
