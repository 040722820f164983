//! Calendar arithmetic for milestone due dates
//!
//! A project's schedule is laid out in fixed 30-day phases counted from the
//! project start date. Milestone `i` (1-indexed) is due at the end of phase
//! `i`, i.e. `start_date + i * 30 days`. This holds even when the schedule
//! only has a single milestone.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of one schedule phase in days
pub const PHASE_LENGTH_DAYS: u32 = 30;

/// Compute the due date of milestone `index` (1-indexed)
///
/// Returns `None` if the date would fall outside the representable range.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::core::due_date;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(due_date(start, 1), NaiveDate::from_ymd_opt(2024, 1, 31));
/// assert_eq!(due_date(start, 3), NaiveDate::from_ymd_opt(2024, 3, 31));
/// ```
pub fn due_date(start_date: NaiveDate, index: u32) -> Option<NaiveDate> {
    let offset = u64::from(index) * u64::from(PHASE_LENGTH_DAYS);
    start_date.checked_add_days(Days::new(offset))
}

/// Number of 30-day phases needed to cover `duration_days` (ceiling)
pub fn phase_count(duration_days: u32) -> u32 {
    duration_days.div_ceil(PHASE_LENGTH_DAYS)
}

/// Phase layout of a project schedule
///
/// Wraps a start date and a total duration and answers the two questions
/// the scheduler asks: how many phases there are and when each is due.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::ScheduleCalendar;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let calendar = ScheduleCalendar::new(start, 100);
/// assert_eq!(calendar.phase_count(), 4);
/// assert_eq!(calendar.phase_due_date(4), NaiveDate::from_ymd_opt(2024, 4, 30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCalendar {
    /// First day of the project
    start_date: NaiveDate,
    /// Total project length in days
    duration_days: u32,
}

impl ScheduleCalendar {
    /// Create a new calendar
    ///
    /// # Panics
    /// Panics if `duration_days` is zero
    pub fn new(start_date: NaiveDate, duration_days: u32) -> Self {
        assert!(duration_days > 0, "duration_days must be positive");
        Self {
            start_date,
            duration_days,
        }
    }

    /// Get the start date
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Get the duration in days
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn phase_count(&self) -> u32 {
        phase_count(self.duration_days)
    }

    /// Due date of phase `index` (1-indexed)
    pub fn phase_due_date(&self, index: u32) -> Option<NaiveDate> {
        due_date(self.start_date, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "duration_days must be positive")]
    fn test_zero_duration_panics() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ScheduleCalendar::new(start, 0);
    }

    #[test]
    fn test_due_date_overflow_is_none() {
        assert_eq!(due_date(NaiveDate::MAX, 1), None);
    }
}
