//! The `gradebook rank` command.

use anyhow::Result;
use serde_json::json;

use gradebook_core::stats::rank_students_by_average;

use super::Workspace;

pub fn execute(ws: &Workspace, batch: String, format: String) -> Result<()> {
    let store = ws.open_store()?;
    let ranked = rank_students_by_average(&store, &batch);

    if format == "json" {
        let rows: Vec<_> = ranked
            .iter()
            .map(|r| {
                json!({
                    "position": r.position,
                    "student_id": r.record.student_id(),
                    "name": r.record.name(),
                    "average": r.average,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No students in batch {batch}.");
        let known: Vec<&str> = store.batches().into_iter().collect();
        if !known.is_empty() {
            println!("Known batches: {}", known.join(", "));
        }
        return Ok(());
    }

    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Name", "Average"]);
    for r in &ranked {
        table.add_row(vec![
            Cell::new(r.position),
            Cell::new(r.record.student_id()),
            Cell::new(r.record.name()),
            Cell::new(r.average),
        ]);
    }

    println!("Ranking for batch {batch}:");
    println!("{table}");
    Ok(())
}
