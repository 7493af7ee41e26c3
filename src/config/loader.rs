//! Configuration loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::value_objects::SupervisorKind;
use crate::error::{DeployError, DeployResult};

use super::suggest::closest;
use super::types::DeployConfig;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(DeployConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::Config {
        path: path.to_path_buf(),
        message: format!("cannot read file: {}", e),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: DeployConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (SITEDEPLOY_* prefix)
pub fn with_env_overrides(config: DeployConfig) -> DeployConfig {
    with_env_overrides_from(config, |name| std::env::var(name).ok())
}

pub(crate) fn with_env_overrides_from<F>(mut config: DeployConfig, var: F) -> DeployConfig
where
    F: Fn(&str) -> Option<String>,
{
    // SITEDEPLOY_HOSTS (comma-separated)
    if let Some(hosts) = var("SITEDEPLOY_HOSTS") {
        let parsed: Vec<String> = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.target.hosts = parsed;
        }
    }

    // SITEDEPLOY_BRANCH
    if let Some(branch) = var("SITEDEPLOY_BRANCH") {
        if !branch.trim().is_empty() {
            config.git.branch = branch.trim().to_string();
        }
    }

    // SITEDEPLOY_TIMEOUT_SECS
    if let Some(secs) = var("SITEDEPLOY_TIMEOUT_SECS") {
        match secs.trim().parse::<u64>() {
            Ok(secs) => config.commands.timeout_secs = secs,
            Err(_) => warn!(
                value = %secs,
                "ignoring SITEDEPLOY_TIMEOUT_SECS: expected a number of seconds"
            ),
        }
    }

    // SITEDEPLOY_SUPERVISOR
    if let Some(kind) = var("SITEDEPLOY_SUPERVISOR") {
        match kind.parse::<SupervisorKind>() {
            Ok(kind) => config.service.supervisor = kind,
            Err(_) => {
                let hint = closest(&kind.trim().to_lowercase(), SupervisorKind::VALID_VALUES)
                    .map(|valid| format!(". Did you mean '{}'?", valid))
                    .unwrap_or_default();
                warn!(
                    value = %kind,
                    "ignoring SITEDEPLOY_SUPERVISOR: expected one of {}{}",
                    SupervisorKind::VALID_VALUES.join(", "),
                    hint
                );
            }
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "hosts",
        "deployment_dir",
        "local_dir",
        "git",
        "repository",
        "branch",
        "remote",
        "templates",
        "config_files",
        "source",
        "destination",
        "service",
        "supervisor",
        "name",
        "directory",
        "run_template",
        "log_template",
        "commands",
        "dependencies",
        "migrate",
        "timeout_secs",
        "ssh",
        "options",
        "parameters",
        "prompt",
        "default",
        "pattern",
        "secret",
    ];

    closest(unknown, CANDIDATES).map(str::to_string)
}
