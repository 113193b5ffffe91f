//! JSON persistence for the record store.
//!
//! The file is a single object keyed by student id. Each value carries exactly
//! `name`, `batch`, `attendance`, and `terms`; the id is never repeated inside
//! the entry. Students are written in registration order and terms in the
//! order they were added; import keeps the order found in the file.

use std::io::{Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, Result};
use crate::model::{Attendance, StudentRecord, TermMarks};
use crate::store::StudentStore;

/// On-disk shape of one student.
#[derive(Debug, Serialize)]
struct StoredStudentRef<'a> {
    name: &'a str,
    batch: &'a str,
    attendance: Attendance,
    terms: &'a IndexMap<String, TermMarks>,
}

#[derive(Debug, Deserialize)]
struct StoredStudent {
    name: String,
    batch: String,
    attendance: Attendance,
    terms: IndexMap<String, TermMarks>,
}

/// What an import changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Ids that were not in the store before.
    pub added: usize,
    /// Ids whose existing record was overwritten.
    pub replaced: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.added + self.replaced
    }
}

/// Write every record to `sink` as pretty-printed JSON (4-space indent).
pub fn export<W: Write>(store: &StudentStore, mut sink: W) -> Result<()> {
    let data: IndexMap<&str, StoredStudentRef<'_>> = store
        .list_all()
        .map(|s| {
            (
                s.student_id(),
                StoredStudentRef {
                    name: s.name(),
                    batch: s.batch(),
                    attendance: s.attendance(),
                    terms: s.terms(),
                },
            )
        })
        .collect();

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut sink, formatter);
    data.serialize(&mut ser).map_err(|e| {
        if e.is_io() {
            GradebookError::Io(e.into())
        } else {
            GradebookError::Format(e)
        }
    })?;
    sink.write_all(b"\n")?;
    sink.flush()?;

    tracing::info!(records = data.len(), "exported student records");
    Ok(())
}

/// Merge the records in `source` into `store`.
///
/// Every imported id overwrites the stored record with that id; other records
/// are left alone. The whole document is parsed and validated before the
/// store is touched, so on error the store is unchanged.
pub fn import<R: Read>(store: &mut StudentStore, source: R) -> Result<ImportSummary> {
    let data: IndexMap<String, StoredStudent> = serde_json::from_reader(source)?;

    for (student_id, entry) in &data {
        if !entry.attendance.is_consistent() {
            tracing::warn!(student_id = %student_id, "rejecting import: attendance out of range");
            return Err(GradebookError::InvalidRecord {
                student_id: student_id.clone(),
                reason: format!(
                    "present_days ({}) exceeds total_days ({})",
                    entry.attendance.present_days, entry.attendance.total_days
                ),
            });
        }
    }

    let mut summary = ImportSummary::default();
    for (student_id, entry) in data {
        let record = StudentRecord::from_parts(
            student_id,
            entry.name,
            entry.batch,
            entry.attendance,
            entry.terms,
        );
        match store.insert(record) {
            Some(_) => summary.replaced += 1,
            None => summary.added += 1,
        }
    }

    tracing::info!(
        added = summary.added,
        replaced = summary.replaced,
        "imported student records"
    );
    Ok(summary)
}

/// Export the store to a file, creating parent directories as needed.
pub fn save_json(store: &StudentStore, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    export(store, std::io::BufWriter::new(file))
}

/// Import a file into the store.
pub fn load_json(store: &mut StudentStore, path: &Path) -> Result<ImportSummary> {
    let file = std::fs::File::open(path)?;
    import(store, std::io::BufReader::new(file))
}

/// Load a store from `path`, or start empty if the file does not exist.
pub fn load_or_default(path: &Path) -> Result<StudentStore> {
    let mut store = StudentStore::new();
    if path.exists() {
        load_json(&mut store, path)?;
    } else {
        tracing::debug!(path = %path.display(), "no data file yet, starting empty");
    }
    Ok(store)
}
