//! Per-student report with text and markdown rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::StudentRecord;

/// A snapshot of one student's figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: String,
    pub name: String,
    pub batch: String,
    /// Attendance percentage, rounded to two decimals.
    pub attendance_percentage: f64,
    /// Rounded term averages, in the order the terms were added.
    pub term_averages: Vec<TermAverage>,
    /// Overall average, rounded to two decimals.
    pub overall_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermAverage {
    pub term: String,
    pub average: f64,
    pub subject_count: usize,
}

impl StudentReport {
    pub fn from_record(record: &StudentRecord) -> Self {
        let term_averages = record
            .terms()
            .iter()
            .map(|(term, marks)| TermAverage {
                term: term.clone(),
                average: record.rounded_term_average(term).unwrap_or(0.0),
                subject_count: marks.len(),
            })
            .collect();

        Self {
            student_id: record.student_id().to_string(),
            name: record.name().to_string(),
            batch: record.batch().to_string(),
            attendance_percentage: record.attendance_percentage(),
            term_averages,
            overall_average: record.calculate_average(),
        }
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## Student Report: {} ({})\n\n",
            self.name, self.student_id
        ));
        md.push_str(&format!("**Batch:** {}\n\n", self.batch));
        md.push_str(&format!(
            "**Attendance:** {}%\n\n",
            self.attendance_percentage
        ));

        if !self.term_averages.is_empty() {
            md.push_str("| Term | Subjects | Average |\n");
            md.push_str("|------|----------|---------|\n");
            for t in &self.term_averages {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    t.term, t.subject_count, t.average
                ));
            }
            md.push('\n');
        }

        md.push_str(&format!("**Overall Average:** {}\n", self.overall_average));
        md
    }
}

impl fmt::Display for StudentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student Report: {} ({})", self.name, self.student_id)?;
        writeln!(f, "Batch: {}", self.batch)?;
        writeln!(f, "Attendance: {}%", self.attendance_percentage)?;
        for t in &self.term_averages {
            writeln!(f, "{} Average: {}", t.term, t.average)?;
        }
        write!(f, "Overall Average: {}", self.overall_average)
    }
}
