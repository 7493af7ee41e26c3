//! Validated parameter collection
//!
//! Each parameter is asked for until the answer matches its pattern or the
//! retry budget runs out. An empty answer falls back to the default.

use tracing::warn;

use crate::domain::ports::Prompter;
use crate::domain::services::TemplateContext;
use crate::domain::value_objects::ParameterSpec;
use crate::error::{DeployError, DeployResult};

/// Invalid answers tolerated per parameter before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Ask for every parameter and return the completed context.
///
/// A `max_attempts` of zero is treated as one. The returned context never
/// holds a value that failed its pattern.
pub fn prompt_parameters(
    prompter: &dyn Prompter,
    specs: &[ParameterSpec],
    max_attempts: usize,
) -> DeployResult<TemplateContext> {
    let attempts = max_attempts.max(1);
    let mut ctx = TemplateContext::new();
    for spec in specs {
        let value = ask_valid(prompter, spec, attempts)?;
        ctx.insert(spec.name.as_str(), value);
    }
    Ok(ctx)
}

fn ask_valid(prompter: &dyn Prompter, spec: &ParameterSpec, attempts: usize) -> DeployResult<String> {
    let mut last = String::new();

    for attempt in 1..=attempts {
        let answer = prompter.ask(&spec.prompt, spec.default.as_deref(), spec.secret)?;
        // Secrets may legitimately start or end with whitespace
        let answer = if spec.secret {
            answer
        } else {
            answer.trim().to_string()
        };
        let value = match &spec.default {
            Some(default) if answer.is_empty() => default.clone(),
            _ => answer,
        };

        if spec.accepts(&value) {
            return Ok(value);
        }

        warn!(
            parameter = %spec.name,
            attempt,
            pattern = spec.pattern(),
            "rejected value{}",
            if spec.secret { String::new() } else { format!(" '{}'", value) }
        );
        last = value;
    }

    Err(DeployError::Validation {
        parameter: spec.name.clone(),
        value: if spec.secret { "********".to_string() } else { last },
        attempts,
    })
}
