//! Orchestrator Module
//!
//! Runs the deployment operations against the configured hosts.
//!
//! ## Structure
//!
//! - `steps` - `StepTracker`, which names, logs and wraps each pipeline step
//! - `use_case` - `Orchestrator` and its operations
//!
//! ## Usage
//!
//! ```ignore
//! use sitedeploy::{Orchestrator, infrastructure::{ScpTransfer, SshRunner}};
//!
//! let orchestrator = Orchestrator::new(env, SshRunner::from_target(&env), ScpTransfer::from_target(&env));
//! orchestrator.deploy()?;
//! ```

mod steps;
mod use_case;

pub use steps::StepTracker;
pub use use_case::{HostStatus, Orchestrator};
