//! Scenario: Routine Deploy
//!
//! Journey: Developer pushes a change and rolls it out to running hosts.
//!
//! Steps:
//! 1. Local branch is checked out and pushed
//! 2. Each host in turn: stop, pull and reset, migrate, install, start
//!
//! Success Criteria:
//! - Commands are issued in exactly this order, one host after another
//! - A failing stop leaves the service untouched and nothing else runs

use sitedeploy::{DeployConfig, DeployError, TargetEnvironment};

use crate::common::*;
use crate::recording::{orchestrator, render};

fn load(env: &TestEnv) -> TargetEnvironment {
    let path = env.path("deploy.toml");
    DeployConfig::load(&path).unwrap().into_target(&path).unwrap()
}

/// SCENARIO: Single runit host, no optional commands
#[test]
fn scenario_deploy_single_host() {
    let env = TestEnv::basic();
    let (orchestrator, plan) = orchestrator(load(&env), None);

    let completed = orchestrator.deploy().unwrap();

    insta::assert_snapshot!(render(&plan), @r"
local$ git checkout master
local$ git push origin master
deploy@web1$ sv d /svc/app
deploy@web1$ cd /srv/app && git pull origin master && git reset --hard
deploy@web1$ sv start /svc/app
");
    assert_eq!(completed.len(), 5);
}

/// SCENARIO: Two hosts with migrations and bundled dependencies
#[test]
fn scenario_update_two_hosts_with_migrations() {
    let env = TestEnv::with_config(
        r#"
[target]
hosts = ["web1", "web2"]
deployment_dir = "/home/site/current"

[git]
repository = "git@example.com:site.git"
branch = "production"

[service]
directory = "/home/site/service/site"

[commands]
dependencies = ["bundle", "install", "--deployment"]
migrate = ["bundle", "exec", "rake", "db:migrate"]
"#,
    );
    let (orchestrator, plan) = orchestrator(load(&env), None);

    orchestrator.update().unwrap();

    insta::assert_snapshot!(render(&plan), @r"
web1$ sv d /home/site/service/site
web1$ cd /home/site/current && git pull origin production && git reset --hard
web1$ cd /home/site/current && bundle exec rake db:migrate
web1$ cd /home/site/current && bundle install --deployment
web1$ sv start /home/site/service/site
web2$ sv d /home/site/service/site
web2$ cd /home/site/current && git pull origin production && git reset --hard
web2$ cd /home/site/current && bundle exec rake db:migrate
web2$ cd /home/site/current && bundle install --deployment
web2$ sv start /home/site/service/site
");
}

/// SCENARIO: The service cannot be stopped
#[test]
fn scenario_stop_failure_halts_deploy() {
    let env = TestEnv::basic();
    let (orchestrator, plan) = orchestrator(load(&env), Some("sv d"));

    let err = orchestrator.deploy().unwrap_err();

    insta::assert_snapshot!(render(&plan), @r"
local$ git checkout master
local$ git push origin master
deploy@web1$ sv d /svc/app
");
    assert!(matches!(
        err,
        DeployError::Step { ref step, .. } if step == "stop service on deploy@web1"
    ));
    assert_eq!(
        err.completed_steps(),
        ["checkout master", "push master to origin"]
    );
}
