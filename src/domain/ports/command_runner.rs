//! Command Runner Port
//!
//! Executes a step either on this machine or on a host over an established
//! ssh connection. Implementations must block until the step finishes.

use crate::domain::value_objects::{ExecutionMode, Step};
use crate::error::DeployResult;

/// Captured result of a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Raw stdout, not trimmed
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

/// Trait for running deployment steps.
///
/// Implementations:
/// - `SshRunner`: spawns local processes and `ssh <host> <script>`
///
/// A non-zero exit must surface as `DeployError::Execution` carrying the
/// rendered command, so callers never inspect `status` to detect failure.
pub trait CommandRunner {
    fn run(&self, mode: &ExecutionMode, step: &Step) -> DeployResult<CommandOutput>;

    /// Run a read-only query whose exit status is part of its answer.
    ///
    /// `systemctl status` exits 3 for a stopped unit and `sv status` exits
    /// non-zero for a down service, yet both print the report the operator
    /// asked for. Implementations return the output for any exit status and
    /// fail only when the command could not run at all.
    fn query(&self, mode: &ExecutionMode, step: &Step) -> DeployResult<CommandOutput> {
        self.run(mode, step)
    }
}
