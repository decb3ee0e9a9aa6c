//! Study-session logging commands for CLI.

use clap::Subcommand;
use studyplan_core::storage::SubjectDb;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Log a completed study session against a subject
    Log {
        /// Subject ID
        subject_id: String,
        /// Session duration in minutes
        #[arg(long)]
        minutes: u32,
        /// Progress percentage points this session added (default: 0)
        #[arg(long, default_value = "0")]
        progress: u8,
    },
    /// List logged sessions
    List {
        /// Only sessions for this subject
        #[arg(long)]
        subject_id: Option<String>,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Log {
            subject_id,
            minutes,
            progress,
        } => {
            let mut db = SubjectDb::open()?;
            let subject = db.log_session(&subject_id, minutes, progress)?;
            println!(
                "Session logged: {minutes} minutes on '{}' (now at {}%)",
                subject.name, subject.progress
            );
        }
        SessionAction::List { subject_id } => {
            let db = SubjectDb::open()?;
            let sessions = db.list_sessions(subject_id.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
