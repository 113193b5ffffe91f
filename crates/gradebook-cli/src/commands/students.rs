//! Record mutation commands: `register`, `add-term`, `update-mark`, `attendance`.

use anyhow::{anyhow, Result};

use gradebook_core::model::{MarkUpdate, TermMarks};

use super::Workspace;

/// Parse a mark, rejecting NaN and infinities.
pub fn parse_mark(s: &str) -> Result<f64, String> {
    let mark: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid mark: '{s}'"))?;
    if !mark.is_finite() {
        return Err(format!("mark must be a finite number, got '{s}'"));
    }
    Ok(mark)
}

/// Parse a `subject=mark` argument.
pub fn parse_subject_mark(s: &str) -> Result<(String, f64), String> {
    let (subject, mark) = s
        .split_once('=')
        .ok_or_else(|| format!("expected subject=mark, got '{s}'"))?;
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(format!("missing subject name in '{s}'"));
    }
    let mark = parse_mark(mark).map_err(|e| format!("{e} in '{s}'"))?;
    Ok((subject.to_string(), mark))
}

pub fn register(ws: &Workspace, id: String, name: String, batch: String) -> Result<()> {
    let mut store = ws.open_store()?;
    let replaced = store.contains(&id);
    store.register(id.as_str(), name, batch);
    ws.save_store(&store)?;

    if replaced {
        println!("Replaced student {id}");
    } else {
        println!("Registered student {id}");
    }
    Ok(())
}

pub fn add_term(ws: &Workspace, id: String, term: String, marks: Vec<(String, f64)>) -> Result<()> {
    let mut store = ws.open_store()?;
    let record = store
        .get_mut(&id)
        .ok_or_else(|| anyhow!("student not found: {id}"))?;

    let subject_marks: TermMarks = marks.into_iter().collect();
    let count = subject_marks.len();
    record.add_term_result(term.as_str(), subject_marks)?;
    ws.save_store(&store)?;

    println!("Recorded {count} subject(s) for {id} in {term}");
    Ok(())
}

pub fn update_mark(
    ws: &Workspace,
    id: String,
    term: String,
    subject: String,
    mark: f64,
) -> Result<()> {
    let mut store = ws.open_store()?;
    let record = store
        .get_mut(&id)
        .ok_or_else(|| anyhow!("student not found: {id}"))?;

    match record.update_subject_mark(&term, &subject, mark)? {
        MarkUpdate::Updated { previous } => {
            ws.save_store(&store)?;
            println!("Updated {id} {term}/{subject}: {previous} -> {mark}");
        }
        MarkUpdate::UnknownTerm => {
            println!("Term '{term}' not found for {id}; nothing changed.");
        }
        MarkUpdate::UnknownSubject => {
            println!("Subject '{subject}' not found in {term} for {id}; nothing changed.");
        }
    }
    Ok(())
}

pub fn attendance(ws: &Workspace, id: String, present: u32, total: u32) -> Result<()> {
    let mut store = ws.open_store()?;
    let record = store
        .get_mut(&id)
        .ok_or_else(|| anyhow!("student not found: {id}"))?;

    record.record_attendance(present, total)?;
    let pct = record.attendance_percentage();
    ws.save_store(&store)?;

    println!("Attendance for {id}: {pct}%");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_subject_mark_valid() {
        assert_eq!(
            parse_subject_mark("math=90.5").unwrap(),
            ("math".to_string(), 90.5)
        );
        assert_eq!(
            parse_subject_mark(" art = 7 ").unwrap(),
            ("art".to_string(), 7.0)
        );
    }

    #[test]
    fn parse_subject_mark_invalid() {
        assert!(parse_subject_mark("math").is_err());
        assert!(parse_subject_mark("=90").is_err());
        assert!(parse_subject_mark("math=abc").is_err());
        assert!(parse_subject_mark("math=NaN").is_err());
        assert!(parse_subject_mark("math=-inf").is_err());
    }

    #[test]
    fn parse_mark_rejects_non_finite() {
        assert_eq!(parse_mark(" 72.5 ").unwrap(), 72.5);
        assert_eq!(parse_mark("-3").unwrap(), -3.0);
        for bad in ["NaN", "nan", "inf", "-infinity", "1e999", "abc", ""] {
            assert!(parse_mark(bad).is_err(), "{bad} accepted");
        }
    }
}
