//! Test environment for running the sitedeploy binary.
//!
//! Provides `TestEnv` - a temporary site checkout holding `deploy.toml`
//! and the default template layout, plus helpers to run the CLI in it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use super::fixtures::*;

/// Result of running a sitedeploy command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as a single JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Isolated site checkout
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    /// A checkout with `BASIC_CONFIG` and every default template
    pub fn basic() -> Self {
        Self::with_config(BASIC_CONFIG)
    }

    pub fn with_config(config: &str) -> Self {
        let env = Self {
            root: TempDir::new().unwrap(),
        };
        env.write("deploy.toml", config);
        env.write("config/config.default.rb", CONFIG_TEMPLATE);
        env.write("config/database.default.rb", DATABASE_TEMPLATE);
        env.write("config/runit/run", RUN_TEMPLATE);
        env.write("config/runit/log/run", LOG_RUN_TEMPLATE);
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Run sitedeploy from the checkout root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        run_in(self.root.path(), args, env_vars)
    }
}

/// Run the binary in `cwd` with a clean `SITEDEPLOY_*` environment
pub fn run_in(cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sitedeploy"));
    cmd.current_dir(cwd).args(args);
    for var in [
        "SITEDEPLOY_HOSTS",
        "SITEDEPLOY_BRANCH",
        "SITEDEPLOY_TIMEOUT_SECS",
        "SITEDEPLOY_SUPERVISOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let output = cmd.output().unwrap();
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
