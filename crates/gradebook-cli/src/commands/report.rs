//! The `gradebook report` command.

use anyhow::{anyhow, Result};

use super::Workspace;

pub fn execute(ws: &Workspace, id: String, format: String) -> Result<()> {
    let store = ws.open_store()?;
    let record = store
        .get(&id)
        .ok_or_else(|| anyhow!("student not found: {id}"))?;
    let report = record.generate_report();

    match format.as_str() {
        "markdown" | "md" => print!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{report}"),
    }
    Ok(())
}
