//! The `gradebook export` and `gradebook import` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::persist;

use super::Workspace;

pub fn export(ws: &Workspace, output: PathBuf) -> Result<()> {
    let store = ws.open_store()?;
    persist::save_json(&store, &output)
        .with_context(|| format!("failed to export to {}", output.display()))?;
    println!("Data exported to {} ({} records)", output.display(), store.len());
    Ok(())
}

pub fn import(ws: &Workspace, input: PathBuf) -> Result<()> {
    let mut store = ws.open_store()?;
    let summary = persist::load_json(&mut store, &input)
        .with_context(|| format!("failed to import {}", input.display()))?;
    ws.save_store(&store)?;
    println!(
        "Data imported from {} ({} added, {} replaced)",
        input.display(),
        summary.added,
        summary.replaced
    );
    Ok(())
}
