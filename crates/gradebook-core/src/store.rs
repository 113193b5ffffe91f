//! The record store: exclusive owner of every [`StudentRecord`].

use std::collections::BTreeSet;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::model::StudentRecord;

/// Student id → record. Iteration follows first registration order; replacing
/// a record keeps its position.
#[derive(Debug, Clone, Default)]
pub struct StudentStore {
    records: IndexMap<String, StudentRecord>,
}

impl StudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh record under `student_id`, replacing any existing one.
    pub fn register(
        &mut self,
        student_id: impl Into<String>,
        name: impl Into<String>,
        batch: impl Into<String>,
    ) -> &mut StudentRecord {
        let record = StudentRecord::new(student_id, name, batch);
        match self.records.entry(record.student_id().to_string()) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(student_id = %entry.key(), "re-registration replaces existing record");
                entry.insert(record);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(record),
        }
    }

    /// Insert a complete record, replacing any record with the same id.
    /// Returns the replaced record.
    pub fn insert(&mut self, record: StudentRecord) -> Option<StudentRecord> {
        self.records.insert(record.student_id().to_string(), record)
    }

    pub fn get(&self, student_id: &str) -> Option<&StudentRecord> {
        self.records.get(student_id)
    }

    /// Mutable access for the record's own mutation methods.
    pub fn get_mut(&mut self, student_id: &str) -> Option<&mut StudentRecord> {
        self.records.get_mut(student_id)
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.records.contains_key(student_id)
    }

    /// All records, in first registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.values()
    }

    /// Distinct batch labels in use.
    pub fn batches(&self) -> BTreeSet<&str> {
        self.records.values().map(StudentRecord::batch).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
