//! SSH command runner
//!
//! Local steps run each command directly (no shell), stopping at the first
//! failure. Remote steps are rendered into one quoted script and handed to
//! `ssh <host> <script>`. Queries keep the output of a non-zero exit; only
//! ssh's own exit status 255 still fails them.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use tracing::debug;

use super::option_args;
use crate::domain::ports::{CommandOutput, CommandRunner};
use crate::domain::value_objects::{ExecutionMode, Step, TargetEnvironment};
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::process::run_with_timeout;

/// Runs steps locally or over ssh
pub struct SshRunner {
    /// Working directory for local steps (relative step dirs resolve here)
    local_dir: PathBuf,
    timeout: Option<Duration>,
    ssh_options: Vec<String>,
}

impl SshRunner {
    pub fn new(local_dir: impl Into<PathBuf>) -> Self {
        Self {
            local_dir: local_dir.into(),
            timeout: None,
            ssh_options: Vec::new(),
        }
    }

    pub fn from_target(env: &TargetEnvironment) -> Self {
        Self::new(env.local_dir.clone())
            .with_timeout(env.timeout)
            .with_ssh_options(env.ssh_options.clone())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ssh_options(mut self, options: Vec<String>) -> Self {
        self.ssh_options = options;
        self
    }

    fn ssh_command(&self, host: &str, script: &str) -> process::Command {
        let mut cmd = process::Command::new("ssh");
        cmd.args(option_args(&self.ssh_options)).arg(host).arg(script);
        cmd
    }

    fn run_local(&self, step: &Step, check: Check) -> DeployResult<CommandOutput> {
        let cwd = match step.cwd() {
            Some(dir) => self.local_dir.join(dir),
            None => self.local_dir.clone(),
        };

        let mut output = CommandOutput::default();
        for command in step.commands() {
            let mut process = process::Command::new(command.program());
            process.args(command.arguments()).current_dir(&cwd);

            let out = self.execute(process, command.to_string(), check)?;
            output.stdout.push_str(&out.stdout);
            output.stderr.push_str(&out.stderr);
            output.status = out.status;
            if output.status != 0 {
                break;
            }
        }
        Ok(output)
    }

    fn run_remote(&self, host: &str, step: &Step, check: Check) -> DeployResult<CommandOutput> {
        let script = step.script();
        let process = self.ssh_command(host, &script);
        let out = self.execute(process, format!("[{}] {}", host, script), check)?;
        if out.status == SSH_CONNECTION_FAILURE {
            // Reached only by queries; ssh reports its own failures this way
            return Err(DeployError::Execution {
                command: format!("[{}] {}", host, script),
                status: Some(out.status),
                stdout: out.stdout,
                stderr: out.stderr,
            });
        }
        Ok(out)
    }

    fn execute(
        &self,
        process: process::Command,
        rendered: String,
        check: Check,
    ) -> DeployResult<CommandOutput> {
        debug!(command = %rendered, "running");

        let out = run_with_timeout(process, self.timeout).map_err(|e| DeployError::Execution {
            command: rendered.clone(),
            status: None,
            stdout: String::new(),
            stderr: e.to_string(),
        })?;

        for line in out.stdout.lines() {
            debug!(command = %rendered, "{}", line);
        }

        if out.timed_out {
            return Err(DeployError::Timeout {
                command: rendered,
                seconds: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            });
        }
        let status = match out.status.code() {
            Some(code) => code,
            // Killed by a signal: there is no status to hand back
            None => {
                return Err(DeployError::Execution {
                    command: rendered,
                    status: None,
                    stdout: out.stdout,
                    stderr: out.stderr,
                })
            }
        };
        if check == Check::Status && status != 0 {
            return Err(DeployError::Execution {
                command: rendered,
                status: Some(status),
                stdout: out.stdout,
                stderr: out.stderr,
            });
        }

        Ok(CommandOutput {
            status,
            stdout: out.stdout,
            stderr: out.stderr,
        })
    }
}

/// Exit status ssh uses for its own errors (connection, authentication)
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Whether a non-zero exit status fails the step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Status,
    OutputOnly,
}

impl CommandRunner for SshRunner {
    fn run(&self, mode: &ExecutionMode, step: &Step) -> DeployResult<CommandOutput> {
        match mode {
            ExecutionMode::Local => self.run_local(step, Check::Status),
            ExecutionMode::Remote { host } => self.run_remote(host, step, Check::Status),
        }
    }

    fn query(&self, mode: &ExecutionMode, step: &Step) -> DeployResult<CommandOutput> {
        match mode {
            ExecutionMode::Local => self.run_local(step, Check::OutputOnly),
            ExecutionMode::Remote { host } => self.run_remote(host, step, Check::OutputOnly),
        }
    }
}
