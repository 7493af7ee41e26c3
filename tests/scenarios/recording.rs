//! Recording ports: every command and upload becomes one line of a plan.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use sitedeploy::domain::ports::{CommandOutput, CommandRunner, FileTransfer};
use sitedeploy::{DeployError, DeployResult, ExecutionMode, Orchestrator, Step, TargetEnvironment};

pub type Plan = Rc<RefCell<Vec<String>>>;

pub struct PlanRunner {
    plan: Plan,
    fail_when: Option<&'static str>,
}

impl CommandRunner for PlanRunner {
    fn run(&self, mode: &ExecutionMode, step: &Step) -> DeployResult<CommandOutput> {
        let line = match mode {
            ExecutionMode::Local => format!("local$ {}", step.script()),
            ExecutionMode::Remote { host } => format!("{}$ {}", host, step.script()),
        };
        self.plan.borrow_mut().push(line);

        match self.fail_when {
            Some(pattern) if step.script().contains(pattern) => Err(DeployError::Execution {
                command: step.script(),
                status: Some(1),
                stdout: String::new(),
                stderr: "fail".to_string(),
            }),
            _ => Ok(CommandOutput::default()),
        }
    }
}

pub struct PlanTransfer {
    plan: Plan,
}

impl FileTransfer for PlanTransfer {
    fn upload(&self, host: &str, local: &Path, remote: &str) -> DeployResult<()> {
        let content = fs::read_to_string(local)?;
        let first_line = content.lines().find(|l| !l.starts_with("#!")).unwrap_or("");
        self.plan
            .borrow_mut()
            .push(format!("scp -> {}:{} ({})", host, remote, first_line));
        Ok(())
    }
}

pub fn orchestrator(
    env: TargetEnvironment,
    fail_when: Option<&'static str>,
) -> (Orchestrator<PlanRunner, PlanTransfer>, Plan) {
    let plan: Plan = Rc::new(RefCell::new(Vec::new()));
    let orchestrator = Orchestrator::new(
        env,
        PlanRunner {
            plan: plan.clone(),
            fail_when,
        },
        PlanTransfer { plan: plan.clone() },
    );
    (orchestrator, plan)
}

pub fn render(plan: &Plan) -> String {
    plan.borrow().join("\n")
}
