//! Gradebook error types.
//!
//! Lookups of unknown students, terms, or subjects are not errors; they are
//! reported through `Option` and [`crate::model::MarkUpdate`]. These variants
//! cover the failures that abort an operation.

use thiserror::Error;

/// Errors that can occur while mutating, loading, or saving student records.
#[derive(Debug, Error)]
pub enum GradebookError {
    /// The data sink or source could not be read or written.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The data is not valid JSON or is missing a required field.
    #[error("invalid gradebook data")]
    Format(#[from] serde_json::Error),

    /// An attendance period reported more present days than total days.
    #[error("invalid attendance: {present_days} present out of {total_days} total days")]
    InvalidAttendance { present_days: u32, total_days: u32 },

    /// A mark was NaN or infinite.
    #[error("invalid mark for {term}/{subject}: {mark} is not a finite number")]
    InvalidMark {
        term: String,
        subject: String,
        mark: f64,
    },

    /// An imported record failed validation.
    #[error("invalid record '{student_id}': {reason}")]
    InvalidRecord { student_id: String, reason: String },

    /// The configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = GradebookError::InvalidAttendance {
            present_days: 6,
            total_days: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid attendance: 6 present out of 5 total days"
        );

        let err = GradebookError::InvalidRecord {
            student_id: "s1".into(),
            reason: "bad".into(),
        };
        assert_eq!(err.to_string(), "invalid record 's1': bad");
    }

    #[test]
    fn json_errors_convert() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: GradebookError = parse_err.into();
        assert!(matches!(err, GradebookError::Format(_)));
    }

    #[test]
    fn wrapped_errors_are_reported_once() {
        use std::error::Error as _;

        let parse_err = serde_json::from_str::<f64>("null").unwrap_err();
        let detail = parse_err.to_string();
        let err: GradebookError = parse_err.into();
        assert_eq!(err.to_string(), "invalid gradebook data");
        assert_eq!(err.source().unwrap().to_string(), detail);

        let err: GradebookError = std::io::Error::other("disk full").into();
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn invalid_mark_message() {
        let err = GradebookError::InvalidMark {
            term: "T1".into(),
            subject: "math".into(),
            mark: f64::NAN,
        };
        assert_eq!(
            err.to_string(),
            "invalid mark for T1/math: NaN is not a finite number"
        );
    }
}
