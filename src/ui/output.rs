use std::path::Path;

use sitedeploy::config::ConfigWarning;
use sitedeploy::{DeployError, HostStatus};

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Supervisor output is printed exactly as the host returned it
pub fn print_status(statuses: &[HostStatus]) {
    for status in statuses {
        println!("== {}", status.host);
        print!("{}", status.output);
        if !status.output.ends_with('\n') {
            println!();
        }
    }
}

pub fn print_completed(task: &str, steps: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        let output = serde_json::json!({
            "event": task,
            "status": "success",
            "steps": steps,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for step in steps {
            println!("  ✓ {}", step);
        }
        println!("\n✓ {} finished ({} steps)", task, steps.len());
    }
    Ok(())
}

/// Report a failed task: the failing step, its cause and what already ran
pub fn print_failure(task: &str, err: &anyhow::Error, json: bool) {
    let deploy_err = err.downcast_ref::<DeployError>();
    let failed_step = match deploy_err {
        Some(DeployError::Step { step, .. }) => Some(step.as_str()),
        _ => None,
    };
    let completed = deploy_err.map(DeployError::completed_steps).unwrap_or(&[]);
    let cause = match deploy_err {
        Some(e) if matches!(e, DeployError::Step { .. }) => e.root().to_string(),
        _ => format!("{:#}", err),
    };

    if json {
        let output = serde_json::json!({
            "event": task,
            "status": "failed",
            "step": failed_step,
            "error": cause,
            "completed": completed,
        });
        match serde_json::to_string(&output) {
            Ok(line) => println!("{}", line),
            Err(_) => eprintln!("Error: {}", cause),
        }
        return;
    }

    eprintln!("✗ {} failed", task);
    if let Some(step) = failed_step {
        eprintln!("  step:  {}", step);
    }
    eprintln!("  error: {}", cause);

    if !completed.is_empty() {
        eprintln!("\nCompleted before the failure:");
        for step in completed {
            eprintln!("  ✓ {}", step);
        }
        eprintln!("\nHosts may be left partially updated; nothing was rolled back.");
    }
}
