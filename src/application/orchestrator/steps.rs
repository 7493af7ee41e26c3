//! Step tracking
//!
//! Each operation is a linear pipeline. The tracker logs every step, keeps
//! the names of the ones that finished, and on the first failure logs what
//! already ran before wrapping the error in `DeployError::Step`. The host
//! may be left half-updated; the completed list tells the operator where.

use tracing::{error, info};

use crate::error::{DeployError, DeployResult};

/// Names and records the steps of one operation
#[derive(Debug)]
pub struct StepTracker {
    operation: &'static str,
    completed: Vec<String>,
}

impl StepTracker {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            completed: Vec::new(),
        }
    }

    /// Run one step; a failure is logged and wrapped with the steps so far
    pub fn run<T>(
        &mut self,
        step: impl Into<String>,
        f: impl FnOnce() -> DeployResult<T>,
    ) -> DeployResult<T> {
        let step = step.into();
        info!(operation = self.operation, "{}", step);

        match f() {
            Ok(value) => {
                self.completed.push(step);
                Ok(value)
            }
            Err(source) => {
                error!(
                    operation = self.operation,
                    step = %step,
                    completed = ?self.completed,
                    "step failed: {}",
                    source
                );
                Err(DeployError::Step {
                    operation: self.operation.to_string(),
                    step,
                    completed: self.completed.clone(),
                    source: Box::new(source),
                })
            }
        }
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Close the operation and return the steps that ran
    pub fn finish(self) -> Vec<String> {
        info!(
            operation = self.operation,
            steps = self.completed.len(),
            "finished"
        );
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_completed_steps() {
        let mut tracker = StepTracker::new("update");
        let value = tracker.run("stop service", || Ok(7)).unwrap();
        tracker.run("pull", || Ok(())).unwrap();

        assert_eq!(value, 7);
        assert_eq!(tracker.completed(), ["stop service", "pull"]);
        assert_eq!(tracker.finish(), vec!["stop service", "pull"]);
    }

    #[test]
    fn failure_carries_completed_steps() {
        let mut tracker = StepTracker::new("deploy");
        tracker.run("checkout master", || Ok(())).unwrap();

        let err = tracker
            .run("push master", || -> DeployResult<()> {
                Err(DeployError::Execution {
                    command: "git push origin master".to_string(),
                    status: Some(128),
                    stdout: String::new(),
                    stderr: "rejected".to_string(),
                })
            })
            .unwrap_err();

        match &err {
            DeployError::Step {
                operation,
                step,
                completed,
                ..
            } => {
                assert_eq!(operation, "deploy");
                assert_eq!(step, "push master");
                assert_eq!(completed, &vec!["checkout master".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), DeployError::Execution { status: Some(128), .. }));
        // The failed step is not recorded as completed
        assert_eq!(tracker.completed(), ["checkout master"]);
    }
}
