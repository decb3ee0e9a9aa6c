//! Study-plan generation commands for CLI.

use clap::Subcommand;
use studyplan_core::engine::{build_plan, exceeds_preferred_end};
use studyplan_core::storage::SubjectDb;
use studyplan_core::Config;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate today's study plan from stored subjects and preferences
    Generate,
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Generate => {
            let config = Config::load_or_default();
            let prefs = config.preferences()?;

            let db = SubjectDb::open()?;
            let subjects = db.list_subjects()?;
            if subjects.is_empty() {
                println!("no subjects found; add one with `studyplan-cli subject add`");
                return Ok(());
            }

            let slots = build_plan(&subjects, &prefs)?;
            if exceeds_preferred_end(&slots, &prefs) {
                eprintln!(
                    "warning: plan runs past preferred end time {}",
                    config.planner.preferred_end_time
                );
            }
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
    }
    Ok(())
}
