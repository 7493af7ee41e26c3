//! Deployment operations
//!
//! Every operation is a strictly sequential pipeline over the configured
//! hosts. Nothing is retried or rolled back: the first failing step aborts
//! the operation and is reported together with the steps that already ran.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::steps::StepTracker;
use crate::domain::ports::{CommandOutput, CommandRunner, FileTransfer};
use crate::domain::services::{CommandSet, Template, TemplateContext};
use crate::domain::value_objects::{ExecutionMode, Step, TargetEnvironment, Upload};
use crate::error::DeployResult;

/// Raw status output of one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostStatus {
    pub host: String,
    pub output: String,
}

/// Deployment orchestrator
///
/// Parameterized by its ports so tests can record the exact command
/// sequence instead of talking to a host.
pub struct Orchestrator<R, T>
where
    R: CommandRunner,
    T: FileTransfer,
{
    env: TargetEnvironment,
    commands: CommandSet,
    runner: R,
    transfer: T,
}

impl<R, T> Orchestrator<R, T>
where
    R: CommandRunner,
    T: FileTransfer,
{
    pub fn new(env: TargetEnvironment, runner: R, transfer: T) -> Self {
        let commands = CommandSet::new(&env);
        for (name, step) in commands.entries() {
            debug!(name, command = %step, cwd = step.cwd().unwrap_or("-"), "command set");
        }

        Self {
            env,
            commands,
            runner,
            transfer,
        }
    }

    pub fn target(&self) -> &TargetEnvironment {
        &self.env
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Query the supervisor on every host; output is returned unaltered.
    ///
    /// A stopped service is a valid answer, so the query's exit status does
    /// not fail the operation.
    pub fn status(&self) -> DeployResult<Vec<HostStatus>> {
        let mut tracker = StepTracker::new("status");
        let mut statuses = Vec::with_capacity(self.env.hosts.len());

        for host in &self.env.hosts {
            let out = tracker.run(format!("query service status on {}", host), || {
                self.runner
                    .query(&ExecutionMode::remote(host), &self.commands.status)
            })?;
            statuses.push(HostStatus {
                host: host.clone(),
                output: out.stdout,
            });
        }

        tracker.finish();
        Ok(statuses)
    }

    /// Push the local branch, then update every host
    pub fn deploy(&self) -> DeployResult<Vec<String>> {
        let mut tracker = StepTracker::new("deploy");
        let branch = &self.env.branch;

        tracker.run(format!("checkout {}", branch), || {
            self.local(&self.commands.checkout)
        })?;
        tracker.run(format!("push {} to {}", branch, self.env.remote), || {
            self.local(&self.commands.push)
        })?;
        for host in &self.env.hosts {
            self.update_host(host, &mut tracker)?;
        }

        Ok(tracker.finish())
    }

    /// Stop, pull and reset, migrate, install dependencies, start
    pub fn update(&self) -> DeployResult<Vec<String>> {
        let mut tracker = StepTracker::new("update");
        for host in &self.env.hosts {
            self.update_host(host, &mut tracker)?;
        }
        Ok(tracker.finish())
    }

    /// Initialise a fresh host and start the service.
    ///
    /// Every template is rendered locally before any host is touched, so a
    /// missing placeholder fails without side effects. The service is only
    /// started once every earlier step on that host succeeded.
    pub fn setup(&self, ctx: &TemplateContext) -> DeployResult<Vec<String>> {
        let ctx = self.template_context(ctx);
        let mut tracker = StepTracker::new("setup");

        let mut uploads = self.config_uploads()?;
        uploads.extend(self.env.supervisor_uploads());
        tracker.run("render templates", || self.check_templates(&uploads, &ctx))?;

        for host in &self.env.hosts {
            tracker.run(format!("create {} on {}", self.env.deployment_dir, host), || {
                self.remote(host, &self.commands.create)
            })?;
            tracker.run(format!("initialise repository on {}", host), || {
                self.remote(host, &self.commands.init)
            })?;
            tracker.run(format!("pull {} on {}", self.env.branch, host), || {
                self.remote(host, &self.commands.pull)
            })?;
            self.install_dependencies_on(host, &mut tracker)?;
            self.configure_on(host, &ctx, &mut tracker)?;
            self.setup_supervisor_on(host, &ctx, &mut tracker)?;
            tracker.run(format!("start service on {}", host), || {
                self.remote(host, &self.commands.start)
            })?;
        }

        Ok(tracker.finish())
    }

    /// Run the dependency command in the deployment directory
    pub fn install_dependencies(&self) -> DeployResult<Vec<String>> {
        let mut tracker = StepTracker::new("install_dependencies");
        for host in &self.env.hosts {
            self.install_dependencies_on(host, &mut tracker)?;
        }
        Ok(tracker.finish())
    }

    /// Render and upload the configuration files only
    pub fn configure(&self, ctx: &TemplateContext) -> DeployResult<Vec<String>> {
        let ctx = self.template_context(ctx);
        let mut tracker = StepTracker::new("configure");

        let uploads = self.config_uploads()?;
        tracker.run("render templates", || self.check_templates(&uploads, &ctx))?;
        for host in &self.env.hosts {
            self.configure_on(host, &ctx, &mut tracker)?;
        }

        Ok(tracker.finish())
    }

    /// Install the supervisor files without starting the service
    pub fn setup_supervisor(&self, ctx: &TemplateContext) -> DeployResult<Vec<String>> {
        let ctx = self.template_context(ctx);
        let mut tracker = StepTracker::new("setup_supervisor");

        let uploads = self.env.supervisor_uploads();
        tracker.run("render templates", || self.check_templates(&uploads, &ctx))?;
        for host in &self.env.hosts {
            self.setup_supervisor_on(host, &ctx, &mut tracker)?;
        }

        Ok(tracker.finish())
    }

    /// Render one template and upload it to `host`.
    ///
    /// The rendered file is staged in a temporary file that is removed
    /// whether the upload succeeds or fails. A missing placeholder fails
    /// before anything is staged or uploaded.
    pub fn render_and_upload(
        &self,
        host: &str,
        upload: &Upload,
        ctx: &TemplateContext,
    ) -> DeployResult<()> {
        let template = Template::load(&self.local_path(&upload.template))?;
        let rendered = template.render(ctx)?;

        let mut staged = tempfile::Builder::new()
            .prefix(".sitedeploy-")
            .tempfile()?;
        staged.write_all(rendered.as_bytes())?;
        staged.flush()?;

        self.transfer.upload(host, staged.path(), &upload.destination)?;
        if upload.executable {
            self.remote(host, &CommandSet::chmod_executable(&upload.destination))?;
        }

        staged.close()?;
        Ok(())
    }

    fn update_host(&self, host: &str, tracker: &mut StepTracker) -> DeployResult<()> {
        tracker.run(format!("stop service on {}", host), || {
            self.remote(host, &self.commands.stop)
        })?;
        tracker.run(format!("pull and reset {} on {}", self.env.branch, host), || {
            self.remote(host, &self.commands.update)
        })?;
        if let Some(migrate) = &self.commands.migrate {
            tracker.run(format!("migrate on {}", host), || self.remote(host, migrate))?;
        }
        self.install_dependencies_on(host, tracker)?;
        tracker.run(format!("start service on {}", host), || {
            self.remote(host, &self.commands.start)
        })?;
        Ok(())
    }

    fn install_dependencies_on(&self, host: &str, tracker: &mut StepTracker) -> DeployResult<()> {
        match &self.commands.install_dependencies {
            Some(step) => {
                tracker.run(format!("install dependencies on {}", host), || {
                    self.remote(host, step)
                })?;
            }
            None => debug!(host, "no dependency command configured"),
        }
        Ok(())
    }

    fn configure_on(
        &self,
        host: &str,
        ctx: &TemplateContext,
        tracker: &mut StepTracker,
    ) -> DeployResult<()> {
        for upload in self.config_uploads()? {
            tracker.run(format!("upload {} to {}", upload.destination, host), || {
                self.render_and_upload(host, &upload, ctx)
            })?;
        }
        Ok(())
    }

    fn setup_supervisor_on(
        &self,
        host: &str,
        ctx: &TemplateContext,
        tracker: &mut StepTracker,
    ) -> DeployResult<()> {
        tracker.run(format!("prepare {} on {}", self.env.service_dir, host), || {
            self.remote(host, &self.commands.prepare_service)
        })?;
        for upload in self.env.supervisor_uploads() {
            tracker.run(format!("upload {} to {}", upload.destination, host), || {
                self.render_and_upload(host, &upload, ctx)
            })?;
        }
        if let Some(activate) = &self.commands.activate_service {
            tracker.run(format!("activate {} on {}", self.env.service_name, host), || {
                self.remote(host, activate)
            })?;
        }
        Ok(())
    }

    /// Configuration file uploads derived from the path patterns
    fn config_uploads(&self) -> DeployResult<Vec<Upload>> {
        let source = Template::new("templates.source", self.env.template_source.as_str());
        let destination = Template::new(
            "templates.destination",
            self.env.template_destination.as_str(),
        );

        self.env
            .config_files
            .iter()
            .map(|name| -> DeployResult<Upload> {
                let ctx = TemplateContext::new().with("name", name.as_str());
                Ok(Upload::file(
                    source.render(&ctx)?,
                    self.env.deployment_path(&destination.render(&ctx)?),
                ))
            })
            .collect()
    }

    fn check_templates(&self, uploads: &[Upload], ctx: &TemplateContext) -> DeployResult<()> {
        for upload in uploads {
            Template::load(&self.local_path(&upload.template))?.render(ctx)?;
        }
        Ok(())
    }

    /// Caller values plus the paths every template may refer to
    fn template_context(&self, ctx: &TemplateContext) -> TemplateContext {
        let mut ctx = ctx.clone();
        ctx.insert_default("deployment_dir", self.env.deployment_dir.as_str());
        ctx.insert_default("service_dir", self.env.service_dir.as_str());
        ctx.insert_default("service_name", self.env.service_name.as_str());
        ctx.insert_default("repository", self.env.repository.as_str());
        ctx.insert_default("branch", self.env.branch.as_str());
        ctx
    }

    fn local_path(&self, template: &std::path::Path) -> PathBuf {
        if template.is_absolute() {
            template.to_path_buf()
        } else {
            self.env.local_dir.join(template)
        }
    }

    fn local(&self, step: &Step) -> DeployResult<CommandOutput> {
        self.runner.run(&ExecutionMode::Local, step)
    }

    fn remote(&self, host: &str, step: &Step) -> DeployResult<CommandOutput> {
        self.runner.run(&ExecutionMode::remote(host), step)
    }
}
