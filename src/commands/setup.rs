//! setup and configure
//!
//! Both render templates from parameters collected up front, so nothing is
//! prompted for once hosts are being changed.

use std::io;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use sitedeploy::infrastructure::{DefaultsPrompter, DialoguerPrompter};
use sitedeploy::{prompt_parameters, TemplateContext, DEFAULT_MAX_ATTEMPTS};

use super::Session;
use crate::ui::output::print_completed;

pub fn cmd_setup(session: Session, yes: bool, json: bool) -> Result<()> {
    let ctx = collect_parameters(&session, yes)?;
    let steps = session.orchestrator().setup(&ctx)?;
    print_completed("setup", &steps, json)
}

pub fn cmd_configure(session: Session, yes: bool, json: bool) -> Result<()> {
    let ctx = collect_parameters(&session, yes)?;
    let steps = session.orchestrator().configure(&ctx)?;
    print_completed("configure", &steps, json)
}

fn collect_parameters(session: &Session, yes: bool) -> Result<TemplateContext> {
    let specs = session.config.parameter_specs(&session.config_path)?;

    if yes {
        // Defaults are not re-asked, one attempt is enough
        return prompt_parameters(&DefaultsPrompter, &specs, 1).context(
            "--yes needs a valid default for every parameter; set `default` under [[parameters]]",
        );
    }

    if !io::stdin().is_terminal() {
        bail!("stdin is not a terminal; pass --yes to accept the configured defaults");
    }

    Ok(prompt_parameters(
        &DialoguerPrompter::new(),
        &specs,
        DEFAULT_MAX_ATTEMPTS,
    )?)
}
