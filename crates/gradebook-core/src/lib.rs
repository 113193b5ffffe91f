//! gradebook-core — Student records, mark aggregation, and persistence.
//!
//! This crate defines the student data model, the owning record store, the
//! cross-record queries (topper, ranking), and the JSON file format that the
//! gradebook CLI builds on.

pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod report;
pub mod stats;
pub mod store;

pub use config::{load_config, GradebookConfig};
pub use error::{GradebookError, Result};
pub use model::{Attendance, MarkUpdate, StudentRecord, TermMarks};
pub use report::StudentReport;
pub use stats::{rank_students_by_average, topper_by_term, RankedStudent, Topper, TopperPolicy};
pub use store::StudentStore;
