//! Command set derived from the target environment
//!
//! Every entry is a pure function of the `TargetEnvironment`; the set is
//! built once per run and only read afterwards.

use crate::domain::value_objects::{Command, Step, SupervisorKind, TargetEnvironment};

/// The symbolic operations a deployment is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    /// Local: switch the working copy to the deploy branch
    pub checkout: Step,
    /// Local: push the deploy branch to the remote
    pub push: Step,
    pub status: Step,
    pub stop: Step,
    pub start: Step,
    /// Pull and hard-reset the remote working copy
    pub update: Step,
    /// Create the deployment directory
    pub create: Step,
    /// Initialise the repository and add the remote
    pub init: Step,
    pub pull: Step,
    pub install_dependencies: Option<Step>,
    pub migrate: Option<Step>,
    /// Create the directories the supervisor files are uploaded into
    pub prepare_service: Step,
    /// Make the supervisor pick up freshly uploaded files
    pub activate_service: Option<Step>,
}

impl CommandSet {
    pub fn new(env: &TargetEnvironment) -> Self {
        let dir = env.deployment_dir.as_str();
        let git = |args: &[&str]| Command::new("git").args(args.iter().copied());

        let (status, stop, start, prepare_service, activate_service) = match env.supervisor {
            SupervisorKind::Runit => (
                Step::single(Command::new("sv").args(["status", env.service_dir.as_str()])),
                Step::single(Command::new("sv").args(["d", env.service_dir.as_str()])),
                Step::single(Command::new("sv").args(["start", env.service_dir.as_str()])),
                Step::single(
                    Command::new("mkdir").args(["-p".to_string(), env.service_path("log")]),
                ),
                None,
            ),
            SupervisorKind::Systemd => {
                let name = env.service_name.as_str();
                (
                    Step::single(Command::new("systemctl").args(["status", "--no-pager", name])),
                    Step::single(Command::new("systemctl").args(["stop", name])),
                    Step::single(Command::new("systemctl").args(["start", name])),
                    Step::single(Command::new("mkdir").args(["-p", env.service_dir.as_str()])),
                    Some(Step::chain([
                        Command::new("systemctl").arg("daemon-reload"),
                        Command::new("systemctl").args(["enable", name]),
                    ])),
                )
            }
        };

        Self {
            checkout: Step::single(git(&["checkout", env.branch.as_str()])),
            push: Step::single(git(&["push", env.remote.as_str(), env.branch.as_str()])),
            status,
            stop,
            start,
            update: Step::chain([
                git(&["pull", env.remote.as_str(), env.branch.as_str()]),
                git(&["reset", "--hard"]),
            ])
            .in_dir(dir),
            create: Step::single(Command::new("mkdir").args(["-p", dir])),
            init: Step::chain([
                git(&["init"]),
                git(&["remote", "add", env.remote.as_str(), env.repository.as_str()]),
            ])
            .in_dir(dir),
            pull: Step::single(git(&["pull", env.remote.as_str(), env.branch.as_str()]))
                .in_dir(dir),
            install_dependencies: env
                .dependencies
                .clone()
                .map(|cmd| Step::single(cmd).in_dir(dir)),
            migrate: env.migrate.clone().map(|cmd| Step::single(cmd).in_dir(dir)),
            prepare_service,
            activate_service,
        }
    }

    /// `chmod +x` for an uploaded file
    pub fn chmod_executable(path: &str) -> Step {
        Step::single(Command::new("chmod").args(["+x", path]))
    }

    /// All configured operations by name, in pipeline order
    pub fn entries(&self) -> Vec<(&'static str, &Step)> {
        let mut entries = vec![
            ("checkout", &self.checkout),
            ("push", &self.push),
            ("status", &self.status),
            ("stop", &self.stop),
            ("start", &self.start),
            ("update", &self.update),
            ("create", &self.create),
            ("init", &self.init),
            ("pull", &self.pull),
        ];
        if let Some(step) = &self.install_dependencies {
            entries.push(("install_dependencies", step));
        }
        if let Some(step) = &self.migrate {
            entries.push(("migrate", step));
        }
        entries.push(("prepare_service", &self.prepare_service));
        if let Some(step) = &self.activate_service {
            entries.push(("activate_service", step));
        }
        entries
    }
}
