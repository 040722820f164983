//! Project setup form
//!
//! The setup screen collects a project name, a duration (slider, 10 to 365
//! days) and a daily resource rate. The budget is not entered directly: it
//! is `duration_days * daily_rate`. Validation here is the form-level
//! check that runs before anything reaches the scheduler.

use crate::models::project::{Project, ProjectPolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest duration the setup slider offers
pub const MIN_SETUP_DURATION_DAYS: u32 = 10;

/// Longest duration the setup slider offers
pub const MAX_SETUP_DURATION_DAYS: u32 = 365;

/// Errors raised by setup form validation
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("Project name is required")]
    EmptyName,

    #[error("Duration {duration_days} days outside allowed range {min}..={max}")]
    DurationOutOfRange { duration_days: u32, min: u32, max: u32 },

    #[error("Daily rate must be non-negative, got {0}")]
    NegativeDailyRate(i64),

    #[error("Budget overflows: {duration_days} days at {daily_rate} cents/day")]
    BudgetOverflow { duration_days: u32, daily_rate: i64 },
}

/// Values submitted from the setup form
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::ProjectSetup;
///
/// let setup = ProjectSetup {
///     name: "Orbital Relay".to_string(),
///     ..ProjectSetup::default()
/// };
/// assert_eq!(setup.total_cost(), Some(450_000)); // 30 days at $150/day
///
/// let project = setup
///     .into_project(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .unwrap();
/// assert_eq!(project.budget(), 450_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSetup {
    pub name: String,
    pub duration_days: u32,
    /// Daily resource rate (i64 cents)
    pub daily_rate: i64,
}

impl Default for ProjectSetup {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration_days: 30,
            daily_rate: 15_000,
        }
    }
}

impl ProjectSetup {
    /// Budget implied by the form, or `None` on overflow
    pub fn total_cost(&self) -> Option<i64> {
        i64::from(self.duration_days).checked_mul(self.daily_rate)
    }

    /// Policy the project will run under once launched
    pub fn policy(&self) -> ProjectPolicy {
        ProjectPolicy::for_duration(self.duration_days)
    }

    /// Check the form fields
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.name.trim().is_empty() {
            return Err(SetupError::EmptyName);
        }

        if !(MIN_SETUP_DURATION_DAYS..=MAX_SETUP_DURATION_DAYS).contains(&self.duration_days) {
            return Err(SetupError::DurationOutOfRange {
                duration_days: self.duration_days,
                min: MIN_SETUP_DURATION_DAYS,
                max: MAX_SETUP_DURATION_DAYS,
            });
        }

        if self.daily_rate < 0 {
            return Err(SetupError::NegativeDailyRate(self.daily_rate));
        }

        if self.total_cost().is_none() {
            return Err(SetupError::BudgetOverflow {
                duration_days: self.duration_days,
                daily_rate: self.daily_rate,
            });
        }

        Ok(())
    }

    /// Validate and turn the form into a project starting at `start_date`
    pub fn into_project(self, start_date: NaiveDate) -> Result<Project, SetupError> {
        self.validate()?;
        let budget = self.total_cost().ok_or(SetupError::BudgetOverflow {
            duration_days: self.duration_days,
            daily_rate: self.daily_rate,
        })?;

        Ok(Project::new(
            self.name.trim().to_string(),
            self.duration_days,
            budget,
            start_date,
        ))
    }
}
