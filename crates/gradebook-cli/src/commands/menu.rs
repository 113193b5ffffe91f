//! The `gradebook menu` command: an interactive numbered menu.
//!
//! The session starts with an empty in-memory store. Records persist only
//! through the export choice; the import choice merges a file into the
//! session.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Result};

use gradebook_core::model::{MarkUpdate, TermMarks};
use gradebook_core::persist;
use gradebook_core::stats::{rank_students_by_average, topper_by_term, TopperPolicy};
use gradebook_core::StudentStore;

use super::Workspace;

pub fn execute(ws: &Workspace) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(stdin.lock(), stdout.lock(), ws.config.topper_policy).run()
}

/// Input ended while the menu was waiting for a line.
#[derive(Debug)]
struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "end of input")
    }
}

impl std::error::Error for EndOfInput {}

enum Flow {
    Continue,
    Exit,
}

struct Menu<R, W> {
    input: R,
    output: W,
    store: StudentStore,
    policy: TopperPolicy,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    fn new(input: R, output: W, policy: TopperPolicy) -> Self {
        Self {
            input,
            output,
            store: StudentStore::new(),
            policy,
        }
    }

    fn run(mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let result = self
                .ask("Enter your choice: ")
                .and_then(|choice| self.dispatch(&choice));
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is::<EndOfInput>() => break,
                Err(e) => writeln!(self.output, "Error: {e:#}")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Student Management System ---")?;
        for (n, label) in [
            "Register Student",
            "Add Term Result",
            "Update Subject Mark",
            "Record Attendance",
            "Generate Report",
            "Get Topper by Term",
            "Rank Students by Batch",
            "Export to JSON",
            "Import from JSON",
            "Exit",
        ]
        .iter()
        .enumerate()
        {
            writeln!(self.output, "{}. {label}", n + 1)?;
        }
        Ok(())
    }

    /// Prompt and read one trimmed line.
    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_parsed<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let raw = self.ask(label)?;
        match raw.parse() {
            Ok(value) => Ok(value),
            Err(_) => bail!("invalid number: '{raw}'"),
        }
    }

    fn ask_mark(&mut self, label: &str) -> Result<f64> {
        let raw = self.ask(label)?;
        super::students::parse_mark(&raw).map_err(anyhow::Error::msg)
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.register()?,
            "2" => self.add_term()?,
            "3" => self.update_mark()?,
            "4" => self.record_attendance()?,
            "5" => self.report()?,
            "6" => self.topper()?,
            "7" => self.rank()?,
            "8" => self.export()?,
            "9" => self.import()?,
            "10" => {
                writeln!(self.output, "Exiting system.")?;
                return Ok(Flow::Exit);
            }
            _ => writeln!(self.output, "Invalid choice. Try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn register(&mut self) -> Result<()> {
        let id = self.ask("Student ID: ")?;
        let name = self.ask("Name: ")?;
        let batch = self.ask("Batch: ")?;
        self.store.register(id, name, batch);
        Ok(())
    }

    fn add_term(&mut self) -> Result<()> {
        let id = self.ask("Student ID: ")?;
        let term = self.ask("Term Name: ")?;
        let count: usize = self.ask_parsed("How many subjects? ")?;
        let mut marks = TermMarks::new();
        for _ in 0..count {
            let subject = self.ask("Subject: ")?;
            let mark = self.ask_mark("Mark: ")?;
            marks.insert(subject, mark);
        }
        match self.store.get_mut(&id) {
            Some(record) => record.add_term_result(term, marks)?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    fn update_mark(&mut self) -> Result<()> {
        let id = self.ask("Student ID: ")?;
        let term = self.ask("Term: ")?;
        let subject = self.ask("Subject: ")?;
        let mark = self.ask_mark("New Mark: ")?;
        let outcome = match self.store.get_mut(&id) {
            Some(record) => record.update_subject_mark(&term, &subject, mark)?,
            None => {
                writeln!(self.output, "Student not found.")?;
                return Ok(());
            }
        };
        match outcome {
            MarkUpdate::Updated { .. } => {}
            MarkUpdate::UnknownTerm => writeln!(self.output, "Term not found.")?,
            MarkUpdate::UnknownSubject => writeln!(self.output, "Subject not found.")?,
        }
        Ok(())
    }

    fn record_attendance(&mut self) -> Result<()> {
        let id = self.ask("Student ID: ")?;
        let present: u32 = self.ask_parsed("Present Days: ")?;
        let total: u32 = self.ask_parsed("Total Days: ")?;
        match self.store.get_mut(&id) {
            Some(record) => record.record_attendance(present, total)?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    fn report(&mut self) -> Result<()> {
        let id = self.ask("Student ID: ")?;
        match self.store.get(&id) {
            Some(record) => writeln!(self.output, "\n{}\n", record.generate_report())?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    fn topper(&mut self) -> Result<()> {
        let term = self.ask("Enter term name: ")?;
        match topper_by_term(&self.store, &term, self.policy) {
            Some(t) => writeln!(
                self.output,
                "Topper in {term}: {} ({}) with average {}",
                t.record.name(),
                t.record.student_id(),
                t.average
            )?,
            None => writeln!(self.output, "No topper found.")?,
        }
        Ok(())
    }

    fn rank(&mut self) -> Result<()> {
        let batch = self.ask("Enter batch: ")?;
        writeln!(self.output, "\nRanking for Batch {batch}:")?;
        for r in rank_students_by_average(&self.store, &batch) {
            writeln!(
                self.output,
                "{}. {} ({}) - Average: {}",
                r.position,
                r.record.name(),
                r.record.student_id(),
                r.average
            )?;
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let filename = self.ask("Filename to export : ")?;
        persist::save_json(&self.store, Path::new(&filename))?;
        writeln!(self.output, "Data exported to {filename}")?;
        Ok(())
    }

    fn import(&mut self) -> Result<()> {
        let filename = self.ask("Filename to import : ")?;
        persist::load_json(&mut self.store, Path::new(&filename))?;
        writeln!(self.output, "Data imported from {filename}")?;
        Ok(())
    }
}
