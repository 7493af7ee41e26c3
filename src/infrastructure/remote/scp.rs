//! SCP Transfer
//!
//! Uploads single rendered files with `scp`. Unlike the ssh runner there is
//! no shell on the local side; the remote path is passed as `host:path`.

use std::path::Path;
use std::process;
use std::time::Duration;

use tracing::debug;

use super::option_args;
use crate::domain::ports::FileTransfer;
use crate::domain::value_objects::TargetEnvironment;
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::process::run_with_timeout;

/// File transfer using scp
#[derive(Debug, Default)]
pub struct ScpTransfer {
    timeout: Option<Duration>,
    ssh_options: Vec<String>,
}

impl ScpTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_target(env: &TargetEnvironment) -> Self {
        Self {
            timeout: env.timeout,
            ssh_options: env.ssh_options.clone(),
        }
    }

    fn command(&self, host: &str, local: &Path, remote: &str) -> process::Command {
        let mut cmd = process::Command::new("scp");
        cmd.arg("-q") // no progress meter
            .args(option_args(&self.ssh_options))
            .arg(local)
            .arg(format!("{}:{}", host, remote));
        cmd
    }
}

impl FileTransfer for ScpTransfer {
    fn upload(&self, host: &str, local: &Path, remote: &str) -> DeployResult<()> {
        debug!(host, local = %local.display(), remote, "uploading");

        let failure = |message: String| DeployError::Transfer {
            local: local.to_path_buf(),
            remote: format!("{}:{}", host, remote),
            message,
        };

        let out = run_with_timeout(self.command(host, local, remote), self.timeout)
            .map_err(|e| failure(e.to_string()))?;

        if out.timed_out {
            let seconds = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
            return Err(failure(format!("scp timed out after {}s", seconds)));
        }
        if !out.status.success() {
            return Err(failure(format!(
                "scp failed with exit code {:?}: {}",
                out.status.code(),
                out.stderr.trim()
            )));
        }
        Ok(())
    }
}
