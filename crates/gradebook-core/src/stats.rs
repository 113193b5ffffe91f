//! Cross-record queries: term topper and batch ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{round2, StudentRecord};
use crate::store::StudentStore;

/// How [`topper_by_term`] treats a best term average of exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopperPolicy {
    /// Any candidate can win, including one averaging `0.0`.
    #[default]
    AnyScore,
    /// The winner must average strictly above `0.0`; an all-zero term has no
    /// topper.
    AboveZero,
}

impl fmt::Display for TopperPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopperPolicy::AnyScore => write!(f, "any-score"),
            TopperPolicy::AboveZero => write!(f, "above-zero"),
        }
    }
}

impl FromStr for TopperPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any-score" | "any" => Ok(TopperPolicy::AnyScore),
            "above-zero" | "positive" => Ok(TopperPolicy::AboveZero),
            other => Err(format!("unknown topper policy: {other}")),
        }
    }
}

/// The best-scoring student in a term.
#[derive(Debug, Clone, Copy)]
pub struct Topper<'a> {
    pub record: &'a StudentRecord,
    /// Term average rounded to two decimals.
    pub average: f64,
}

/// A student's place in a batch ranking.
#[derive(Debug, Clone, Copy)]
pub struct RankedStudent<'a> {
    /// 1-based position.
    pub position: usize,
    pub record: &'a StudentRecord,
    /// Overall average, as returned by [`StudentRecord::calculate_average`].
    pub average: f64,
}

/// Find the student with the highest average in `term`.
///
/// Records without the term, or whose term has no subjects, are not
/// candidates. Ties go to the first record in store order reaching the
/// maximum.
pub fn topper_by_term<'a>(
    store: &'a StudentStore,
    term: &str,
    policy: TopperPolicy,
) -> Option<Topper<'a>> {
    let mut best: Option<(&StudentRecord, f64)> = None;

    for record in store.list_all() {
        let Some(marks) = record.term(term) else {
            continue;
        };
        if marks.is_empty() {
            continue;
        }
        let avg = marks.values().sum::<f64>() / marks.len() as f64;
        let beats = match best {
            Some((_, best_avg)) => avg > best_avg,
            None => match policy {
                TopperPolicy::AnyScore => true,
                TopperPolicy::AboveZero => avg > 0.0,
            },
        };
        if beats {
            best = Some((record, avg));
        }
    }

    match best {
        Some((record, avg)) => {
            tracing::debug!(term, student_id = record.student_id(), avg, "topper found");
            Some(Topper {
                record,
                average: round2(avg),
            })
        }
        None => {
            tracing::debug!(term, %policy, "no topper");
            None
        }
    }
}

/// Rank the students of `batch` by overall average, highest first.
///
/// Batch matching is exact and case-sensitive. Equal averages keep store
/// order.
pub fn rank_students_by_average<'a>(store: &'a StudentStore, batch: &str) -> Vec<RankedStudent<'a>> {
    let mut scored: Vec<(&StudentRecord, f64)> = store
        .list_all()
        .filter(|s| s.batch() == batch)
        .map(|s| (s, s.calculate_average()))
        .collect();

    // stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (record, average))| RankedStudent {
            position: i + 1,
            record,
            average,
        })
        .collect()
}
