//! The `gradebook topper` command.

use anyhow::{anyhow, Result};

use gradebook_core::stats::{topper_by_term, TopperPolicy};

use super::Workspace;

pub fn execute(ws: &Workspace, term: String, policy: Option<String>) -> Result<()> {
    let policy = match policy {
        Some(p) => p.parse::<TopperPolicy>().map_err(|e| anyhow!(e))?,
        None => ws.config.topper_policy,
    };
    let store = ws.open_store()?;

    match topper_by_term(&store, &term, policy) {
        Some(topper) => println!(
            "Topper in {term}: {} ({}) with average {}",
            topper.record.name(),
            topper.record.student_id(),
            topper.average
        ),
        None => println!("No topper found."),
    }
    Ok(())
}
