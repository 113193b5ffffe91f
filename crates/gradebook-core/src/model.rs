//! Core data model types for gradebook.
//!
//! A [`StudentRecord`] holds a student's identity, cohort, attendance totals,
//! and per-term subject marks. Records are only mutated through their own
//! methods; the fields stay private so the invariants below always hold.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GradebookError, Result};
use crate::report::StudentReport;

/// Subject name → mark for a single term, in insertion order.
pub type TermMarks = IndexMap<String, f64>;

/// Reject marks that cannot be persisted (NaN and infinities).
pub(crate) fn check_mark(term: &str, subject: &str, mark: f64) -> Result<()> {
    if mark.is_finite() {
        Ok(())
    } else {
        Err(GradebookError::InvalidMark {
            term: term.to_string(),
            subject: subject.to_string(),
            mark,
        })
    }
}

/// Round to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accumulated attendance counters.
///
/// `present_days <= total_days` holds for every value produced by
/// [`StudentRecord::record_attendance`] and by a successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Total school days recorded.
    pub total_days: u32,
    /// Days the student was present.
    pub present_days: u32,
}

impl Attendance {
    /// Returns `true` if present days do not exceed total days.
    pub fn is_consistent(&self) -> bool {
        self.present_days <= self.total_days
    }
}

/// Outcome of [`StudentRecord::update_subject_mark`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkUpdate {
    /// The mark was replaced; carries the old value.
    Updated { previous: f64 },
    /// No such term; the record is unchanged.
    UnknownTerm,
    /// The term exists but has no such subject; the record is unchanged.
    UnknownSubject,
}

/// A single student and everything recorded about them.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    student_id: String,
    name: String,
    batch: String,
    attendance: Attendance,
    terms: IndexMap<String, TermMarks>,
}

impl StudentRecord {
    /// Create a record with zero attendance and no terms.
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        batch: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            batch: batch.into(),
            attendance: Attendance::default(),
            terms: IndexMap::new(),
        }
    }

    /// Rebuild a record from persisted parts. Callers validate `attendance`.
    pub(crate) fn from_parts(
        student_id: String,
        name: String,
        batch: String,
        attendance: Attendance,
        terms: IndexMap<String, TermMarks>,
    ) -> Self {
        Self {
            student_id,
            name,
            batch,
            attendance,
            terms,
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &str {
        &self.batch
    }

    pub fn attendance(&self) -> Attendance {
        self.attendance
    }

    pub fn terms(&self) -> &IndexMap<String, TermMarks> {
        &self.terms
    }

    /// Marks for one term, if the term has been added.
    pub fn term(&self, term: &str) -> Option<&TermMarks> {
        self.terms.get(term)
    }

    /// Replace the subject marks for `term` wholesale.
    ///
    /// An empty mapping is allowed; such a term is skipped by every
    /// computation that divides by subject count. A replaced term keeps its
    /// display position. Non-finite marks are rejected and leave the record
    /// unchanged.
    pub fn add_term_result(
        &mut self,
        term: impl Into<String>,
        subject_marks: TermMarks,
    ) -> Result<()> {
        let term = term.into();
        for (subject, mark) in &subject_marks {
            check_mark(&term, subject, *mark)?;
        }
        tracing::debug!(
            student_id = %self.student_id,
            term = %term,
            subjects = subject_marks.len(),
            "term result added"
        );
        self.terms.insert(term, subject_marks);
        Ok(())
    }

    /// Overwrite an existing mark. Unknown terms and subjects leave the record
    /// untouched; a non-finite mark is an error.
    pub fn update_subject_mark(
        &mut self,
        term: &str,
        subject: &str,
        new_mark: f64,
    ) -> Result<MarkUpdate> {
        check_mark(term, subject, new_mark)?;
        let Some(marks) = self.terms.get_mut(term) else {
            return Ok(MarkUpdate::UnknownTerm);
        };
        match marks.get_mut(subject) {
            Some(mark) => {
                let previous = *mark;
                *mark = new_mark;
                tracing::debug!(
                    student_id = %self.student_id,
                    term,
                    subject,
                    previous,
                    new_mark,
                    "mark updated"
                );
                Ok(MarkUpdate::Updated { previous })
            }
            None => Ok(MarkUpdate::UnknownSubject),
        }
    }

    /// Add an attendance period to the running totals.
    ///
    /// Rejects periods with more present than total days, and sums that would
    /// overflow. The record is unchanged on error.
    pub fn record_attendance(&mut self, present_days: u32, total_days: u32) -> Result<()> {
        let invalid = || GradebookError::InvalidAttendance {
            present_days,
            total_days,
        };
        if present_days > total_days {
            tracing::warn!(
                student_id = %self.student_id,
                present_days,
                total_days,
                "attendance period rejected"
            );
            return Err(invalid());
        }
        let present = self
            .attendance
            .present_days
            .checked_add(present_days)
            .ok_or_else(invalid)?;
        let total = self
            .attendance
            .total_days
            .checked_add(total_days)
            .ok_or_else(invalid)?;
        self.attendance = Attendance {
            total_days: total,
            present_days: present,
        };
        Ok(())
    }

    /// Mean of every mark across every term, rounded to two decimals.
    /// Returns `0.0` when no subject has been recorded.
    pub fn calculate_average(&self) -> f64 {
        let (sum, count) = self
            .terms
            .values()
            .fold((0.0, 0usize), |(sum, count), marks| {
                (sum + marks.values().sum::<f64>(), count + marks.len())
            });
        if count == 0 {
            0.0
        } else {
            round2(sum / count as f64)
        }
    }

    /// Present days as a percentage of total days, rounded to two decimals.
    pub fn attendance_percentage(&self) -> f64 {
        let Attendance {
            total_days,
            present_days,
        } = self.attendance;
        if total_days == 0 {
            0.0
        } else {
            round2(present_days as f64 / total_days as f64 * 100.0)
        }
    }

    /// Unrounded mean mark for `term`.
    ///
    /// `None` if the term is absent, `Some(0.0)` if it has no subjects.
    pub fn term_average(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|marks| {
            if marks.is_empty() {
                0.0
            } else {
                marks.values().sum::<f64>() / marks.len() as f64
            }
        })
    }

    /// [`Self::term_average`] rounded to two decimals.
    pub fn rounded_term_average(&self, term: &str) -> Option<f64> {
        self.term_average(term).map(round2)
    }

    /// Summarize this record for display.
    pub fn generate_report(&self) -> StudentReport {
        StudentReport::from_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(pairs: &[(&str, f64)]) -> TermMarks {
        pairs.iter().map(|(s, m)| (s.to_string(), *m)).collect()
    }

    #[test]
    fn new_record_is_empty() {
        let s = StudentRecord::new("s1", "Asha", "2024A");
        assert_eq!(s.student_id(), "s1");
        assert_eq!(s.attendance(), Attendance::default());
        assert!(s.terms().is_empty());
        assert_eq!(s.calculate_average(), 0.0);
        assert_eq!(s.attendance_percentage(), 0.0);
    }

    #[test]
    fn average_across_terms() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("a", 100.0)])).unwrap();
        s.add_term_result("T2", marks(&[("b", 0.0), ("c", 50.0)])).unwrap();
        assert_eq!(s.calculate_average(), 50.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("a", 70.0), ("b", 80.0), ("c", 81.0)])).unwrap();
        assert_eq!(s.calculate_average(), 77.0);
        s.add_term_result("T1", marks(&[("a", 10.0), ("b", 20.0), ("c", 0.0)])).unwrap();
        assert_eq!(s.calculate_average(), 10.0);
        s.add_term_result("T1", marks(&[("a", 1.0), ("b", 0.0), ("c", 0.0)])).unwrap();
        assert_eq!(s.calculate_average(), 0.33);
    }

    #[test]
    fn empty_terms_do_not_count() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", TermMarks::new()).unwrap();
        assert_eq!(s.calculate_average(), 0.0);
        assert_eq!(s.term_average("T1"), Some(0.0));
        assert_eq!(s.term_average("T9"), None);
    }

    #[test]
    fn add_term_replaces_not_merges() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("math", 90.0), ("sci", 80.0)])).unwrap();
        s.add_term_result("T1", marks(&[("art", 60.0)])).unwrap();
        assert_eq!(s.term("T1"), Some(&marks(&[("art", 60.0)])));
    }

    #[test]
    fn update_existing_mark() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("math", 90.0)])).unwrap();
        let outcome = s.update_subject_mark("T1", "math", 95.0).unwrap();
        assert_eq!(outcome, MarkUpdate::Updated { previous: 90.0 });
        assert_eq!(s.term("T1").unwrap()["math"], 95.0);
    }

    #[test]
    fn update_unknown_term_or_subject_is_noop() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("math", 90.0)])).unwrap();
        let before = s.terms().clone();

        assert_eq!(
            s.update_subject_mark("T2", "math", 10.0).unwrap(),
            MarkUpdate::UnknownTerm
        );
        assert_eq!(
            s.update_subject_mark("T1", "history", 10.0).unwrap(),
            MarkUpdate::UnknownSubject
        );
        assert_eq!(s.terms(), &before);
    }

    #[test]
    fn attendance_accumulates() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.record_attendance(3, 5).unwrap();
        s.record_attendance(2, 5).unwrap();
        assert_eq!(
            s.attendance(),
            Attendance {
                total_days: 10,
                present_days: 5
            }
        );
        assert_eq!(s.attendance_percentage(), 50.0);
    }

    #[test]
    fn attendance_percentage_rounds() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.record_attendance(2, 3).unwrap();
        assert_eq!(s.attendance_percentage(), 66.67);
    }

    #[test]
    fn attendance_rejects_more_present_than_total() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.record_attendance(1, 2).unwrap();
        let err = s.record_attendance(4, 3).unwrap_err();
        assert!(matches!(
            err,
            GradebookError::InvalidAttendance {
                present_days: 4,
                total_days: 3
            }
        ));
        assert_eq!(s.attendance().present_days, 1);
        assert_eq!(s.attendance().total_days, 2);
    }

    #[test]
    fn attendance_rejects_overflow() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.record_attendance(0, u32::MAX).unwrap();
        assert!(s.record_attendance(0, 1).is_err());
        assert_eq!(s.attendance().total_days, u32::MAX);
    }

    #[test]
    fn rounded_term_average() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("a", 1.0), ("b", 1.0), ("c", 0.0)])).unwrap();
        assert_eq!(s.rounded_term_average("T1"), Some(0.67));
    }

    #[test]
    fn add_term_rejects_non_finite_marks() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("math", 90.0)])).unwrap();
        let before = s.terms().clone();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = s
                .add_term_result("T1", marks(&[("math", 80.0), ("sci", bad)]))
                .unwrap_err();
            assert!(matches!(
                err,
                GradebookError::InvalidMark { ref term, ref subject, .. }
                    if term == "T1" && subject == "sci"
            ));
            assert!(s.add_term_result("T2", marks(&[("art", bad)])).is_err());
        }
        assert_eq!(s.terms(), &before);
    }

    #[test]
    fn update_rejects_non_finite_marks() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("T1", marks(&[("math", 90.0)])).unwrap();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = s.update_subject_mark("T1", "math", bad).unwrap_err();
            assert!(matches!(err, GradebookError::InvalidMark { .. }));
        }
        assert_eq!(s.term("T1").unwrap()["math"], 90.0);
        assert_eq!(s.calculate_average(), 90.0);
    }

    #[test]
    fn terms_keep_insertion_order() {
        let mut s = StudentRecord::new("s1", "Asha", "2024A");
        s.add_term_result("Term2", marks(&[("zoology", 80.0), ("art", 60.0)]))
            .unwrap();
        s.add_term_result("Term10", marks(&[("math", 70.0)])).unwrap();
        s.add_term_result("Term1", marks(&[("math", 50.0)])).unwrap();

        let terms: Vec<&str> = s.terms().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["Term2", "Term10", "Term1"]);
        let subjects: Vec<&str> = s.term("Term2").unwrap().keys().map(String::as_str).collect();
        assert_eq!(subjects, vec!["zoology", "art"]);

        // replacing a term keeps its slot
        s.add_term_result("Term2", marks(&[("history", 40.0)])).unwrap();
        let terms: Vec<&str> = s.terms().keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["Term2", "Term10", "Term1"]);
    }
}
