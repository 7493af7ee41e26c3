//! deploy, update and install-dependencies

use anyhow::Result;

use super::Session;
use crate::ui::output::print_completed;

pub fn cmd_deploy(session: Session, json: bool) -> Result<()> {
    let steps = session.orchestrator().deploy()?;
    print_completed("deploy", &steps, json)
}

pub fn cmd_update(session: Session, json: bool) -> Result<()> {
    let steps = session.orchestrator().update()?;
    print_completed("update", &steps, json)
}

pub fn cmd_install_dependencies(session: Session, json: bool) -> Result<()> {
    if session.env.dependencies.is_none() && !json {
        eprintln!("No dependency command configured ([commands] dependencies); nothing to do.");
    }
    let steps = session.orchestrator().install_dependencies()?;
    print_completed("install-dependencies", &steps, json)
}
