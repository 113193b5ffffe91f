//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::Workspace;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Student marks and attendance tracker"
)]
struct Cli {
    /// Student data file (overrides the configured path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a student, replacing any record with the same id
    Register {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        batch: String,
    },

    /// Set the subject marks for a term
    AddTerm {
        #[arg(long)]
        id: String,
        #[arg(long)]
        term: String,
        /// Subject mark as subject=value (repeatable)
        #[arg(long = "mark", value_parser = commands::students::parse_subject_mark)]
        marks: Vec<(String, f64)>,
    },

    /// Change an existing subject mark
    UpdateMark {
        #[arg(long)]
        id: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        subject: String,
        #[arg(long, allow_hyphen_values = true, value_parser = commands::students::parse_mark)]
        mark: f64,
    },

    /// Add an attendance period
    Attendance {
        #[arg(long)]
        id: String,
        /// Days present in the period
        #[arg(long)]
        present: u32,
        /// Total days in the period
        #[arg(long)]
        total: u32,
    },

    /// Show a student's report
    Report {
        #[arg(long)]
        id: String,
        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Find the best student in a term
    Topper {
        #[arg(long)]
        term: String,
        /// Zero-average policy: any-score, above-zero (default: from config)
        #[arg(long)]
        policy: Option<String>,
    },

    /// Rank a batch by overall average
    Rank {
        #[arg(long)]
        batch: String,
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Write all records to another JSON file
    Export {
        #[arg(long)]
        output: PathBuf,
    },

    /// Merge records from a JSON file into the data file
    Import {
        #[arg(long)]
        input: PathBuf,
    },

    /// Interactive numbered menu
    Menu,

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    tracing_subscriber::filter::LevelFilter::WARN.into(),
                )
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        command => Workspace::load(cli.data, cli.config).and_then(|ws| dispatch(&ws, command)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn dispatch(ws: &Workspace, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Register { id, name, batch } => commands::students::register(ws, id, name, batch),
        Commands::AddTerm { id, term, marks } => commands::students::add_term(ws, id, term, marks),
        Commands::UpdateMark {
            id,
            term,
            subject,
            mark,
        } => commands::students::update_mark(ws, id, term, subject, mark),
        Commands::Attendance { id, present, total } => {
            commands::students::attendance(ws, id, present, total)
        }
        Commands::Report { id, format } => commands::report::execute(ws, id, format),
        Commands::Topper { term, policy } => commands::topper::execute(ws, term, policy),
        Commands::Rank { batch, format } => commands::rank::execute(ws, batch, format),
        Commands::Export { output } => commands::transfer::export(ws, output),
        Commands::Import { input } => commands::transfer::import(ws, input),
        Commands::Menu => commands::menu::execute(ws),
        Commands::Init => commands::init::execute(),
    }
}
