//! Domain Value Objects
//!
//! Immutable value types that describe where and how a deployment runs.

mod command;
mod parameter;
mod supervisor;
mod target;

pub use command::{shell_quote, Command, ExecutionMode, Step};
pub use parameter::ParameterSpec;
pub use supervisor::SupervisorKind;
pub use target::{remote_join, TargetEnvironment, Upload};
