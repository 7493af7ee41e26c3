//! Configuration type definitions
//!
//! `deploy.toml` maps one-to-one onto these sections. Every section is
//! optional at the serde level; required values are checked when the
//! configuration is turned into a `TargetEnvironment`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Command, ParameterSpec, SupervisorKind, TargetEnvironment};
use crate::error::{DeployError, DeployResult};

use super::loader::{self, ConfigWarning};

/// Hosts and the remote working copy
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetConfig {
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default)]
    pub deployment_dir: String,

    /// Local working copy, relative to the configuration file
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
}

/// Repository, branch and remote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub repository: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            branch: default_branch(),
            remote: default_remote(),
        }
    }
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration file templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Names substituted for `{name}` in `source` and `destination`
    #[serde(default)]
    pub config_files: Vec<String>,

    #[serde(default = "default_template_source")]
    pub source: String,

    #[serde(default = "default_template_destination")]
    pub destination: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            config_files: Vec::new(),
            source: default_template_source(),
            destination: default_template_destination(),
        }
    }
}

fn default_template_source() -> String {
    "config/{name}.default.rb".to_string()
}

fn default_template_destination() -> String {
    "config/{name}.rb".to_string()
}

/// Process supervisor settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub supervisor: SupervisorKind,

    /// Defaults to the last component of `directory`
    #[serde(default)]
    pub name: Option<String>,

    /// Runit service directory or systemd unit directory
    #[serde(default)]
    pub directory: String,

    #[serde(default)]
    pub run_template: Option<PathBuf>,

    #[serde(default)]
    pub log_template: Option<PathBuf>,
}

/// Optional commands run in the deployment directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// argv list, e.g. `["bundle", "install", "--deployment"]`
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,

    #[serde(default)]
    pub migrate: Option<Vec<String>>,

    /// Per-command timeout; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            dependencies: None,
            migrate: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    600
}

/// Extra ssh/scp settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SshConfig {
    /// Passed as `-o <option>` to both ssh and scp
    #[serde(default)]
    pub options: Vec<String>,
}

/// A setup parameter; overrides a built-in one with the same name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,

    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub secret: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeployConfig {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

impl DeployConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeployResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and return non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply `SITEDEPLOY_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Build the immutable target description.
    ///
    /// `path` is the configuration file; a relative `local_dir` is resolved
    /// against its directory.
    pub fn into_target(self, path: &Path) -> DeployResult<TargetEnvironment> {
        let invalid = |message: String| DeployError::Config {
            path: path.to_path_buf(),
            message,
        };

        if self.target.hosts.is_empty() {
            return Err(invalid("target.hosts must list at least one host".into()));
        }
        for host in &self.target.hosts {
            if host.trim().is_empty() || host.starts_with('-') {
                return Err(invalid(format!("invalid host '{}'", host)));
            }
        }
        for (key, value) in [
            ("target.deployment_dir", &self.target.deployment_dir),
            ("git.repository", &self.git.repository),
            ("git.branch", &self.git.branch),
            ("git.remote", &self.git.remote),
            ("service.directory", &self.service.directory),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} must not be empty", key)));
            }
        }

        let dependencies = argv_command(&self.commands.dependencies, "commands.dependencies")
            .map_err(&invalid)?;
        let migrate = argv_command(&self.commands.migrate, "commands.migrate").map_err(&invalid)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let local_dir = match self.target.local_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        };

        let mut env = TargetEnvironment::new(
            self.target.hosts,
            self.target.deployment_dir,
            self.service.directory,
            self.git.repository,
        );
        env.branch = self.git.branch;
        env.remote = self.git.remote;
        env.local_dir = if local_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            local_dir
        };
        env.config_files = self.templates.config_files;
        env.template_source = self.templates.source;
        env.template_destination = self.templates.destination;
        env.supervisor = self.service.supervisor;
        if let Some(name) = self.service.name.filter(|n| !n.trim().is_empty()) {
            env.service_name = name;
        }
        if env.service_name.is_empty() {
            return Err(invalid("service.name could not be derived from service.directory".into()));
        }
        env.run_template = match (self.service.run_template, env.supervisor) {
            (Some(template), _) => template,
            (None, SupervisorKind::Runit) => env.run_template,
            (None, SupervisorKind::Systemd) => {
                PathBuf::from(format!("config/systemd/{}.service", env.service_name))
            }
        };
        if let Some(template) = self.service.log_template {
            env.log_template = template;
        }
        env.dependencies = dependencies;
        env.migrate = migrate;
        env.timeout = match self.commands.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        env.ssh_options = self.ssh.options;

        Ok(env)
    }

    /// Built-in setup parameters merged with the `[[parameters]]` entries.
    ///
    /// An entry whose name matches a built-in parameter replaces only the
    /// fields it sets; any other entry is appended.
    pub fn parameter_specs(&self, path: &Path) -> DeployResult<Vec<ParameterSpec>> {
        let invalid = |name: &str, message: String| DeployError::Config {
            path: path.to_path_buf(),
            message: format!("parameter '{}': {}", name, message),
        };

        let mut specs = ParameterSpec::builtin().map_err(|e| invalid("builtin", e.to_string()))?;

        for param in &self.parameters {
            if param.name.trim().is_empty() {
                return Err(invalid("", "name must not be empty".into()));
            }
            let existing = specs.iter().position(|s| s.name == param.name);
            let base = existing.map(|i| &specs[i]);

            let prompt = param
                .prompt
                .clone()
                .or_else(|| base.map(|s| s.prompt.clone()))
                .unwrap_or_else(|| param.name.clone());
            let pattern = match (&param.pattern, base) {
                (Some(pattern), _) => pattern.clone(),
                // Strip the anchoring added by ParameterSpec::new
                (None, Some(spec)) => unanchor(spec.pattern()).to_string(),
                (None, None) => ".*".to_string(),
            };

            let mut spec = ParameterSpec::new(param.name.clone(), prompt, &pattern)
                .map_err(|e| invalid(&param.name, e.to_string()))?;
            spec.default = param
                .default
                .clone()
                .or_else(|| base.and_then(|s| s.default.clone()));
            spec.secret = param.secret || base.is_some_and(|s| s.secret);

            if let Some(default) = &spec.default {
                if !spec.accepts(default) {
                    return Err(invalid(
                        &param.name,
                        format!("default '{}' does not match its pattern", default),
                    ));
                }
            }

            match existing {
                Some(i) => specs[i] = spec,
                None => specs.push(spec),
            }
        }

        Ok(specs)
    }
}

fn argv_command(argv: &Option<Vec<String>>, key: &str) -> Result<Option<Command>, String> {
    match argv {
        None => Ok(None),
        Some(argv) => Command::from_argv(argv)
            .map(Some)
            .ok_or_else(|| format!("{} must name a program", key)),
    }
}

fn unanchor(pattern: &str) -> &str {
    pattern
        .strip_prefix("^(?:")
        .and_then(|p| p.strip_suffix(")$"))
        .unwrap_or(pattern)
}
