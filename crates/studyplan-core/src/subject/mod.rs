//! Subject data model.
//!
//! A subject is the unit the allocation engine schedules: a display name,
//! a completion percentage, a deadline and a priority tag. The engine only
//! ever sees read-only snapshots; ownership lives in [`crate::storage`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Subject priority tag.
///
/// A tagged three-variant enumeration validated at the data-model boundary:
/// anything other than `low`, `medium` or `high` is rejected where it enters
/// the system, never silently mapped to a fallback weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used for ordering only, never persisted.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::UnrecognizedPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject being studied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Completion percentage, 0-100.
    pub progress: u8,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Create a new subject at zero progress.
    ///
    /// # Errors
    /// Returns an error if the name is empty.
    pub fn new(
        name: impl Into<String>,
        deadline: NaiveDate,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        let subject = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            progress: 0,
            deadline,
            priority,
            created_at: Utc::now(),
        };
        subject.validate()?;
        Ok(subject)
    }

    /// Check the data-model invariants: non-empty name, progress 0-100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.progress > 100 {
            return Err(ValidationError::ProgressOutOfRange(self.progress));
        }
        Ok(())
    }

    /// Add study progress, clamped at 100%.
    pub fn add_progress(&mut self, delta: u8) {
        self.progress = u16::from(self.progress)
            .saturating_add(u16::from(delta))
            .min(100) as u8;
    }

    /// Days remaining until the deadline (negative if overdue).
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, priority: Priority) -> Subject {
        Subject::new(
            name,
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            priority,
        )
        .unwrap()
    }

    #[test]
    fn priority_weights() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
    }

    #[test]
    fn priority_parses_recognized_values() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn priority_rejects_unrecognized_value() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnrecognizedPriority("urgent".to_string())
        );
    }

    #[test]
    fn priority_serde_is_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
        let parsed: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }

    #[test]
    fn new_subject_starts_at_zero_progress() {
        let s = subject("Math", Priority::High);
        assert_eq!(s.progress, 0);
        assert!(!s.id.is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Subject::new(
            "  ",
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            Priority::Low,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn add_progress_clamps_at_100() {
        let mut s = subject("Math", Priority::Medium);
        s.add_progress(60);
        assert_eq!(s.progress, 60);
        s.add_progress(60);
        assert_eq!(s.progress, 100);
        s.add_progress(255);
        assert_eq!(s.progress, 100);
    }

    #[test]
    fn days_until_deadline() {
        let s = subject("Math", Priority::Medium);
        let today = NaiveDate::from_ymd_opt(2026, 9, 28).unwrap();
        assert_eq!(s.days_until_deadline(today), 3);
        let late = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert_eq!(s.days_until_deadline(late), -2);
    }

    #[test]
    fn subject_serialization_roundtrip() {
        let s = subject("Physics", Priority::Low);
        let json = serde_json::to_string(&s).unwrap();
        let decoded: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, s);
    }
}
