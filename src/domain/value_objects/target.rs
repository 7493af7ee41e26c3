//! Target environment value object

use std::path::PathBuf;
use std::time::Duration;

use super::{Command, SupervisorKind};

/// Everything that describes where and how the site is deployed.
///
/// Built once at startup from the configuration file and never mutated;
/// the orchestrator receives it by value.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEnvironment {
    /// Hosts to deploy to, visited in order (`user@host` or ssh aliases)
    pub hosts: Vec<String>,
    /// Remote directory holding the git working copy
    pub deployment_dir: String,
    /// Source repository URL added as the git remote
    pub repository: String,
    pub branch: String,
    /// Name of the git remote (local and remote side)
    pub remote: String,
    /// Local git working copy; local templates are resolved against it
    pub local_dir: PathBuf,
    /// Configuration file names substituted into the template patterns
    pub config_files: Vec<String>,
    /// Local template path pattern, `{name}` is the config file name
    pub template_source: String,
    /// Remote destination pattern, relative to `deployment_dir` unless absolute
    pub template_destination: String,
    pub supervisor: SupervisorKind,
    pub service_name: String,
    /// Runit service directory, or the unit directory for systemd
    pub service_dir: String,
    /// Runit `run` script template, or the unit file template for systemd
    pub run_template: PathBuf,
    /// Runit `log/run` script template (unused for systemd)
    pub log_template: PathBuf,
    pub dependencies: Option<Command>,
    pub migrate: Option<Command>,
    /// Per-command timeout; `None` waits forever
    pub timeout: Option<Duration>,
    /// Extra `-o` options passed to ssh and scp
    pub ssh_options: Vec<String>,
}

impl TargetEnvironment {
    /// A runit target with the default layout and no optional commands.
    pub fn new(
        hosts: Vec<String>,
        deployment_dir: impl Into<String>,
        service_dir: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        let service_dir = service_dir.into();
        let service_name = service_dir
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            hosts,
            deployment_dir: deployment_dir.into(),
            repository: repository.into(),
            branch: "master".to_string(),
            remote: "origin".to_string(),
            local_dir: PathBuf::from("."),
            config_files: Vec::new(),
            template_source: "config/{name}.default.rb".to_string(),
            template_destination: "config/{name}.rb".to_string(),
            supervisor: SupervisorKind::Runit,
            service_name,
            service_dir,
            run_template: PathBuf::from("config/runit/run"),
            log_template: PathBuf::from("config/runit/log/run"),
            dependencies: None,
            migrate: None,
            timeout: Some(Duration::from_secs(600)),
            ssh_options: Vec::new(),
        }
    }

    /// Absolute remote path for a path relative to the deployment directory
    pub fn deployment_path(&self, relative: &str) -> String {
        remote_join(&self.deployment_dir, relative)
    }

    /// Absolute remote path for a path relative to the service directory
    pub fn service_path(&self, relative: &str) -> String {
        remote_join(&self.service_dir, relative)
    }

    /// The supervisor files rendered during setup
    pub fn supervisor_uploads(&self) -> Vec<Upload> {
        match self.supervisor {
            SupervisorKind::Runit => vec![
                Upload::executable(self.run_template.clone(), self.service_path("run")),
                Upload::executable(self.log_template.clone(), self.service_path("log/run")),
            ],
            SupervisorKind::Systemd => vec![Upload::file(
                self.run_template.clone(),
                self.service_path(&format!("{}.service", self.service_name)),
            )],
        }
    }
}

/// A local template and where its rendered form goes on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Template path, relative to the local working copy unless absolute
    pub template: PathBuf,
    /// Absolute remote path
    pub destination: String,
    /// `chmod +x` after upload
    pub executable: bool,
}

impl Upload {
    pub fn file(template: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            destination: destination.into(),
            executable: false,
        }
    }

    pub fn executable(template: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            executable: true,
            ..Self::file(template, destination)
        }
    }
}

/// Join remote (always `/`-separated) paths; absolute `relative` wins.
pub fn remote_join(base: &str, relative: &str) -> String {
    if relative.starts_with('/') || base.is_empty() {
        return relative.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), relative.trim_start_matches("./"))
}
