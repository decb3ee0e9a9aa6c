//! Minute-of-day time arithmetic.
//!
//! The allocator walks a cursor measured in whole minutes from midnight.
//! The heuristic assumes the schedule never crosses midnight, so a cursor
//! is valid only below [`MINUTES_PER_DAY`]; callers reject anything past
//! that instead of wrapping.

use chrono::{NaiveTime, Timelike};

use crate::error::ValidationError;

pub(crate) const MINUTES_PER_DAY: u32 = 24 * 60;

/// Whole minutes elapsed since midnight. Seconds are truncated.
pub(crate) fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Time-of-day at `minute` minutes past midnight, or `None` at or past 24:00.
pub(crate) fn time_at_minute(minute: u32) -> Option<NaiveTime> {
    if minute >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)
}

/// Parse an `HH:MM` time-of-day string.
///
/// # Errors
/// Returns an error naming `field` if the string is not a valid `HH:MM` time.
pub(crate) fn parse_hhmm(field: &'static str, s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| ValidationError::InvalidPreference {
        field,
        message: format!("'{s}' is not a valid HH:MM time: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_of_day_truncates_seconds() {
        let t = NaiveTime::from_hms_opt(9, 30, 59).unwrap();
        assert_eq!(minute_of_day(t), 9 * 60 + 30);
    }

    #[test]
    fn time_at_minute_roundtrip() {
        let t = time_at_minute(14 * 60 + 45).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(14, 45, 0).unwrap());
        assert_eq!(minute_of_day(t), 14 * 60 + 45);
    }

    #[test]
    fn time_at_minute_rejects_midnight_and_beyond() {
        assert!(time_at_minute(MINUTES_PER_DAY).is_none());
        assert!(time_at_minute(MINUTES_PER_DAY + 1).is_none());
        assert!(time_at_minute(MINUTES_PER_DAY - 1).is_some());
    }

    #[test]
    fn parse_hhmm_accepts_valid_times() {
        assert_eq!(
            parse_hhmm("preferred_start_time", "09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_hhmm_rejects_garbage() {
        let err = parse_hhmm("preferred_start_time", "9am").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidPreference {
                field: "preferred_start_time",
                ..
            }
        ));
    }
}
