//! Scenario: Fresh Host
//!
//! Journey: Operator brings a new machine into service.
//!
//! Steps:
//! 1. Parameters are collected (here: every default via `--yes` semantics)
//! 2. Repository is created and pulled
//! 3. Configuration and runit scripts are rendered and uploaded
//! 4. Service is started
//!
//! Success Criteria:
//! - Rendered files carry the collected values
//! - The service is never started after a failed step

use sitedeploy::infrastructure::DefaultsPrompter;
use sitedeploy::{prompt_parameters, DeployConfig, DeployError, TargetEnvironment, TemplateContext};

use crate::common::*;
use crate::recording::{orchestrator, render};

fn load(env: &TestEnv) -> (TargetEnvironment, TemplateContext) {
    let path = env.path("deploy.toml");
    let config = DeployConfig::load(&path).unwrap();
    let specs = config.parameter_specs(&path).unwrap();
    let ctx = prompt_parameters(&DefaultsPrompter, &specs, 1).unwrap();
    (config.into_target(&path).unwrap(), ctx)
}

/// SCENARIO: Setup with defaults on a runit host
#[test]
fn scenario_setup_fresh_runit_host() {
    let env = TestEnv::with_config(&format!("{}{}", BASIC_CONFIG, PARAMETER_DEFAULTS));
    let (target, ctx) = load(&env);
    let (orchestrator, plan) = orchestrator(target, None);

    orchestrator.setup(&ctx).unwrap();

    insta::assert_snapshot!(render(&plan), @r"
deploy@web1$ mkdir -p /srv/app
deploy@web1$ cd /srv/app && git init && git remote add origin git://github.com/example/site.git
deploy@web1$ cd /srv/app && git pull origin master
scp -> deploy@web1:/srv/app/config/config.rb (Ramaze.options.mode = :live)
scp -> deploy@web1:/srv/app/config/database.rb (postgres://site:@localhost/site)
deploy@web1$ mkdir -p /svc/app/log
scp -> deploy@web1:/svc/app/run (cd /srv/app && exec unicorn -c config/unicorn.rb)
deploy@web1$ chmod +x /svc/app/run
scp -> deploy@web1:/svc/app/log/run (exec svlogd -tt ./main)
deploy@web1$ chmod +x /svc/app/log/run
deploy@web1$ sv start /svc/app
");
}

/// SCENARIO: Repository initialisation fails half-way
#[test]
fn scenario_setup_failure_never_starts_service() {
    let env = TestEnv::with_config(&format!("{}{}", BASIC_CONFIG, PARAMETER_DEFAULTS));
    let (target, ctx) = load(&env);
    let (orchestrator, plan) = orchestrator(target, Some("git init"));

    let err = orchestrator.setup(&ctx).unwrap_err();

    insta::assert_snapshot!(render(&plan), @r"
deploy@web1$ mkdir -p /srv/app
deploy@web1$ cd /srv/app && git init && git remote add origin git://github.com/example/site.git
");
    assert!(matches!(err.root(), DeployError::Execution { .. }));
}

/// SCENARIO: A template references a value nobody provided
#[test]
fn scenario_setup_missing_value_changes_nothing() {
    let env = TestEnv::with_config(&format!("{}{}", BASIC_CONFIG, PARAMETER_DEFAULTS));
    env.write("config/runit/run", "#!/bin/sh\nexec {server} -p {port}\n");
    let (target, ctx) = load(&env);
    let (orchestrator, plan) = orchestrator(target, None);

    let err = orchestrator.setup(&ctx).unwrap_err();

    assert!(plan.borrow().is_empty());
    match err.root() {
        DeployError::Template { message, .. } => {
            assert!(message.contains("{port}, {server}"), "{}", message)
        }
        other => panic!("unexpected error: {other}"),
    }
}
