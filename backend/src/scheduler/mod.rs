//! Milestone Scheduler
//!
//! Turns a project's duration and budget into the ordered list of payment
//! milestones it will be settled against.
//!
//! # Scheduling Policy
//!
//! ```text
//! duration >= 90 days  →  ceil(duration / 30) phases, one milestone each
//! duration <  90 days  →  one "Standard Delivery Window" milestone
//! ```
//!
//! - Tranches are equal integer-cent splits of the budget; the remainder
//!   cents land on the final milestone (same rule as split transactions).
//! - Milestone `i` is due `start_date + i * 30 days`.
//! - Milestone 1 starts `current`, the rest `pending`.
//!
//! # Critical Invariants
//!
//! - **Exact Sum**: Σ payment_amount == budget, no rounding leakage
//! - **Contiguous Ids**: ids run 1..=N in schedule order
//! - **Single Current**: exactly one milestone is `current` after scheduling

use crate::core::calendar::{phase_count, ScheduleCalendar, PHASE_LENGTH_DAYS};
use crate::models::milestone::{Milestone, MilestoneStatus};
use crate::models::project::{Project, ProjectPolicy};
use chrono::NaiveDate;
use thiserror::Error;

/// Label of the single milestone of a standard project
pub const STANDARD_MILESTONE_LABEL: &str = "Standard Delivery Window";

/// Errors that can occur while scheduling
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid project parameters: {0}")]
    InvalidProjectParameters(String),
}

/// Number of milestones a project of `duration_days` is split into
///
/// # Example
/// ```
/// use milestone_treasury_core_rs::scheduler::milestone_count;
///
/// assert_eq!(milestone_count(30), 1);
/// assert_eq!(milestone_count(89), 1);
/// assert_eq!(milestone_count(90), 3);
/// assert_eq!(milestone_count(100), 4);
/// ```
pub fn milestone_count(duration_days: u32) -> u32 {
    match ProjectPolicy::for_duration(duration_days) {
        ProjectPolicy::LargeProject => phase_count(duration_days),
        ProjectPolicy::Standard => 1,
    }
}

/// Split `budget` into `count` tranches that sum to `budget` exactly
///
/// Every tranche gets `budget / count`; the last one also takes
/// `budget % count`.
///
/// # Panics
/// Panics if `count` is zero
///
/// # Example
/// ```
/// use milestone_treasury_core_rs::scheduler::split_budget;
///
/// assert_eq!(split_budget(100_000, 4), vec![25_000; 4]);
/// assert_eq!(split_budget(100, 3), vec![33, 33, 34]);
/// ```
pub fn split_budget(budget: i64, count: u32) -> Vec<i64> {
    assert!(count > 0, "count must be positive");

    let parts = i64::from(count);
    let base_amount = budget / parts;
    let remainder = budget % parts;

    (1..=count)
        .map(|i| {
            if i == count {
                base_amount + remainder // Last tranche gets remainder
            } else {
                base_amount
            }
        })
        .collect()
}

/// Label for milestone `index` under `policy`
pub fn milestone_label(policy: ProjectPolicy, index: u32) -> String {
    match policy {
        ProjectPolicy::LargeProject => format!(
            "Phase {}: {} Day Progress Check",
            index,
            index * PHASE_LENGTH_DAYS
        ),
        ProjectPolicy::Standard => STANDARD_MILESTONE_LABEL.to_string(),
    }
}

/// Build the initial milestone schedule
///
/// # Arguments
///
/// * `duration_days` - Project length, must be at least 1
/// * `budget` - Total budget in cents, must be non-negative
/// * `start_date` - First day of the project
///
/// # Returns
///
/// - `Ok(milestones)` ordered by id, first one `current`
/// - `Err(ScheduleError::InvalidProjectParameters)` for a zero duration,
///   a negative budget, or due dates past the end of the calendar
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{schedule, MilestoneStatus};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let milestones = schedule(90, 900_000, start).unwrap();
///
/// assert_eq!(milestones.len(), 3);
/// assert_eq!(milestones[0].label(), "Phase 1: 30 Day Progress Check");
/// assert_eq!(milestones[0].status(), MilestoneStatus::Current);
/// assert_eq!(milestones[2].payment_amount(), 300_000);
/// ```
pub fn schedule(
    duration_days: u32,
    budget: i64,
    start_date: NaiveDate,
) -> Result<Vec<Milestone>, ScheduleError> {
    if duration_days < 1 {
        return Err(ScheduleError::InvalidProjectParameters(
            "duration must be at least 1 day".to_string(),
        ));
    }
    if budget < 0 {
        return Err(ScheduleError::InvalidProjectParameters(format!(
            "budget must be non-negative, got {}",
            budget
        )));
    }

    let policy = ProjectPolicy::for_duration(duration_days);
    let calendar = ScheduleCalendar::new(start_date, duration_days);
    let count = match policy {
        ProjectPolicy::LargeProject => calendar.phase_count(),
        ProjectPolicy::Standard => 1,
    };

    // The last due date bounds all the others; check it before allocating
    if calendar.phase_due_date(count).is_none() {
        return Err(ScheduleError::InvalidProjectParameters(format!(
            "due date of milestone {} is out of range",
            count
        )));
    }

    let amounts = split_budget(budget, count);
    let mut milestones = Vec::with_capacity(amounts.len());
    for (index, amount) in (1..=count).zip(amounts) {
        let due = calendar.phase_due_date(index).ok_or_else(|| {
            ScheduleError::InvalidProjectParameters(format!(
                "due date of milestone {} is out of range",
                index
            ))
        })?;

        let status = if index == 1 {
            MilestoneStatus::Current
        } else {
            MilestoneStatus::Pending
        };

        milestones.push(
            Milestone::new(index, milestone_label(policy, index), due, amount).with_status(status),
        );
    }

    Ok(milestones)
}

/// Build the initial schedule for a project
pub fn schedule_project(project: &Project) -> Result<Vec<Milestone>, ScheduleError> {
    schedule(project.duration_days(), project.budget(), project.start_date())
}
