//! Study statistics commands for CLI.

use clap::Subcommand;
use studyplan_core::storage::SubjectDb;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Statistics for today
    Today,
    /// All-time statistics
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SubjectDb::open()?;
    let stats = match action {
        StatsAction::Today => db.stats_today()?,
        StatsAction::All => db.stats_all()?,
    };
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
