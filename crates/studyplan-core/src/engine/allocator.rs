//! Slot allocation.
//!
//! Consumes a ranked subject sequence plus user time preferences and
//! produces an ordered sequence of study and break slots covering the daily
//! study-hour budget. Deterministic single pass: remaining budget is spread
//! evenly across subjects not yet scheduled, high-priority subjects get one
//! extra minute, and rest breaks are interleaved between study slots without
//! consuming budget.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::clock;
use super::ranker::rank;
use crate::error::ValidationError;
use crate::subject::{Priority, Subject};

/// Label carried by every rest slot.
pub const REST_LABEL: &str = "Break";

/// User time preferences for a single plan invocation.
///
/// An explicit immutable configuration value passed as a parameter, never
/// read from ambient state. The engine invents no defaults; missing or
/// out-of-range fields are the caller's validation responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Daily study budget in hours, 1-24.
    pub study_hours_per_day: u32,
    /// Time-of-day the first slot starts at.
    pub preferred_start: NaiveTime,
    /// Informational only: the allocator does not clamp to it, but
    /// [`exceeds_preferred_end`] lets callers warn when a plan runs past it.
    pub preferred_end: NaiveTime,
    /// Rest duration between study slots. Zero suppresses rest slots.
    pub break_minutes: u32,
}

impl Preferences {
    /// Check the preference invariants.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidPreference`] if the study-hour
    /// budget is zero or above 24.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.study_hours_per_day == 0 || self.study_hours_per_day > 24 {
            return Err(ValidationError::InvalidPreference {
                field: "study_hours_per_day",
                message: format!(
                    "{} is outside the sane range 1-24",
                    self.study_hours_per_day
                ),
            });
        }
        Ok(())
    }

    /// Total study minutes available per day, exclusive of break time.
    pub fn budget_minutes(&self) -> u32 {
        self.study_hours_per_day * 60
    }
}

/// Kind of study slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Focused study for subjects under 50% progress
    IntensiveStudy,
    /// Consolidation for subjects at 50% progress or more
    Review,
    /// Rest break between study slots
    Rest,
}

/// One contiguous block of time assigned to study, review, or rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySlot {
    pub start: NaiveTime,
    /// Subject name, or [`REST_LABEL`] for rest slots.
    pub label: String,
    /// Always positive.
    pub duration_min: u32,
    pub kind: SlotKind,
}

impl StudySlot {
    /// Minutes past midnight at which this slot ends.
    fn end_minute(&self) -> u32 {
        clock::minute_of_day(self.start) + self.duration_min
    }
}

/// Allocate the daily study window across an already-ranked subject sequence.
///
/// An empty subject list is a valid, non-error outcome and yields an empty
/// sequence; the caller owns the empty-state prompt. For non-empty input the
/// emitted study slots sum to exactly the study-hour budget, rest slots sit
/// strictly between study slots, and slot start times are non-decreasing by
/// construction.
///
/// # Errors
/// Returns [`ValidationError::InvalidPreference`] for an out-of-range
/// budget, and [`ValidationError::CrossesMidnight`] if any slot would end
/// past 24:00. Midnight rollover is a documented boundary of the heuristic,
/// not something it models.
pub fn allocate(
    ranked: &[Subject],
    prefs: &Preferences,
) -> Result<Vec<StudySlot>, ValidationError> {
    prefs.validate()?;
    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    let n = ranked.len();
    let mut remaining = prefs.budget_minutes();
    let mut cursor = clock::minute_of_day(prefs.preferred_start);
    let mut slots = Vec::with_capacity(2 * n - 1);

    for (i, subject) in ranked.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        // Spread remaining time evenly across subjects not yet scheduled,
        // never below one minute while budget remains.
        let share = (remaining / (n - i) as u32).max(1);
        let duration = if subject.priority == Priority::High {
            (share + 1).min(remaining)
        } else {
            share.min(remaining)
        };

        let kind = if subject.progress < 50 {
            SlotKind::IntensiveStudy
        } else {
            SlotKind::Review
        };

        slots.push(StudySlot {
            start: place(cursor, duration)?,
            label: subject.name.clone(),
            duration_min: duration,
            kind,
        });
        cursor += duration;
        remaining -= duration;

        // Breaks live between study slots and are outside the study budget.
        if i + 1 < n && remaining > 0 && prefs.break_minutes > 0 {
            slots.push(StudySlot {
                start: place(cursor, prefs.break_minutes)?,
                label: REST_LABEL.to_string(),
                duration_min: prefs.break_minutes,
                kind: SlotKind::Rest,
            });
            cursor += prefs.break_minutes;
        }
    }

    Ok(slots)
}

/// Rank then allocate in one call.
///
/// # Errors
/// Propagates the [`allocate`] errors.
pub fn build_plan(
    subjects: &[Subject],
    prefs: &Preferences,
) -> Result<Vec<StudySlot>, ValidationError> {
    allocate(&rank(subjects), prefs)
}

/// Whether the last slot of a plan ends after the preferred end time.
pub fn exceeds_preferred_end(slots: &[StudySlot], prefs: &Preferences) -> bool {
    slots
        .last()
        .is_some_and(|slot| slot.end_minute() > clock::minute_of_day(prefs.preferred_end))
}

/// Start time for a slot at `cursor`, rejecting any slot ending past 24:00.
fn place(cursor: u32, duration: u32) -> Result<NaiveTime, ValidationError> {
    let end = cursor + duration;
    match clock::time_at_minute(cursor) {
        // end <= 24:00 and duration >= 1, so the start is representable
        Some(start) if end <= clock::MINUTES_PER_DAY => Ok(start),
        _ => Err(ValidationError::CrossesMidnight {
            overshoot_min: end.saturating_sub(clock::MINUTES_PER_DAY).max(1),
        }),
    }
}
