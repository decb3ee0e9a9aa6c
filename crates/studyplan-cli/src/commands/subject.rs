//! Subject management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use studyplan_core::storage::SubjectDb;
use studyplan_core::subject::{Priority, Subject};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a new subject
    Add {
        /// Subject name
        name: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
        /// Priority: low, medium or high (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Initial progress percentage (default: 0)
        #[arg(long, default_value = "0")]
        progress: u8,
    },
    /// List subjects
    List,
    /// Get subject details
    Get {
        /// Subject ID
        id: String,
    },
    /// Update a subject
    Update {
        /// Subject ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New progress percentage
        #[arg(long)]
        progress: Option<u8>,
    },
    /// Delete a subject
    Delete {
        /// Subject ID
        id: String,
    },
}

pub fn run(action: SubjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SubjectDb::open()?;

    match action {
        SubjectAction::Add {
            name,
            deadline,
            priority,
            progress,
        } => {
            let mut subject = Subject::new(
                name,
                parse_deadline(&deadline)?,
                priority.parse::<Priority>()?,
            )?;
            subject.progress = progress;
            subject.validate()?;
            db.create_subject(&subject)?;
            println!("Subject created: {}", subject.id);
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::List => {
            let subjects = db.list_subjects()?;
            println!("{}", serde_json::to_string_pretty(&subjects)?);
        }
        SubjectAction::Get { id } => match db.get_subject(&id)? {
            Some(subject) => {
                println!("{}", serde_json::to_string_pretty(&subject)?);
                let days = subject.days_until_deadline(Utc::now().date_naive());
                if days < 0 {
                    println!("Deadline overdue by {} days", -days);
                } else {
                    println!("Deadline in {days} days");
                }
            }
            None => println!("Subject not found: {id}"),
        },
        SubjectAction::Update {
            id,
            name,
            deadline,
            priority,
            progress,
        } => {
            let mut subject = db
                .get_subject(&id)?
                .ok_or_else(|| format!("Subject not found: {id}"))?;

            if let Some(n) = name {
                subject.name = n;
            }
            if let Some(d) = deadline {
                subject.deadline = parse_deadline(&d)?;
            }
            if let Some(p) = priority {
                subject.priority = p.parse::<Priority>()?;
            }
            if let Some(p) = progress {
                subject.progress = p;
            }
            subject.validate()?;

            db.update_subject(&subject)?;
            println!("Subject updated:");
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::Delete { id } => {
            db.delete_subject(&id)?;
            println!("Subject deleted: {id}");
        }
    }
    Ok(())
}

fn parse_deadline(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid deadline '{s}' (expected YYYY-MM-DD): {e}").into())
}
