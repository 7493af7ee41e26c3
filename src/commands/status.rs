use anyhow::Result;

use super::Session;
use crate::ui::output::print_status;

pub fn cmd_status(session: Session, json: bool) -> Result<()> {
    let statuses = session.orchestrator().status()?;

    if json {
        let output = serde_json::json!({
            "event": "status",
            "hosts": statuses,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_status(&statuses);
    }

    Ok(())
}
