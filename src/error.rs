//! Error types for sitedeploy
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for deployment operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// A local or remote command exited unsuccessfully (or could not be spawned)
    #[error("command `{command}` failed ({}): {}", describe_status(.status), describe_output(.stdout, .stderr))]
    Execution {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// A command ran past the configured timeout and was killed
    #[error("command `{command}` timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// Uploading a file to a host failed
    #[error("failed to upload {} to {remote}: {message}", .local.display())]
    Transfer {
        local: PathBuf,
        remote: String,
        message: String,
    },

    /// A template could not be read or references an unknown placeholder
    #[error("template {template}: {message}")]
    Template { template: String, message: String },

    /// Interactive input kept failing its validation pattern
    #[error("invalid value '{value}' for {parameter} after {attempts} attempt(s)")]
    Validation {
        parameter: String,
        value: String,
        attempts: usize,
    },

    /// Invalid or incomplete deployment configuration
    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// A step of a multi-step operation failed; earlier steps already ran
    #[error("{operation}: step '{step}' failed: {source}")]
    Step {
        operation: String,
        step: String,
        completed: Vec<String>,
        #[source]
        source: Box<DeployError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// The innermost error, looking through `Step` wrappers
    pub fn root(&self) -> &DeployError {
        match self {
            DeployError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Steps that finished before this error, if it came from a pipeline
    pub fn completed_steps(&self) -> &[String] {
        match self {
            DeployError::Step { completed, .. } => completed,
            _ => &[],
        }
    }
}

/// stderr when there is any, otherwise stdout (`systemctl` reports there)
fn describe_output<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    match stderr.trim() {
        "" => stdout.trim(),
        stderr => stderr,
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status".to_string(),
    }
}
