//! Project model
//!
//! A project is created once from the setup form and never changes
//! afterwards. It owns the parameters the scheduler works from:
//! duration in days, budget in cents and a start date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Projects at or above this many days get a multi-phase schedule
pub const LARGE_PROJECT_THRESHOLD_DAYS: u32 = 90;

/// Scheduling policy implied by the project duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectPolicy {
    /// Single delivery window, progress confirmed manually
    Standard,

    /// Monthly phase checkpoints with automated tranches (smart escrow)
    LargeProject,
}

impl ProjectPolicy {
    /// Classify a duration (inclusive boundary at 90 days)
    pub fn for_duration(duration_days: u32) -> Self {
        if duration_days >= LARGE_PROJECT_THRESHOLD_DAYS {
            ProjectPolicy::LargeProject
        } else {
            ProjectPolicy::Standard
        }
    }

    /// Short badge shown next to the roadmap
    pub fn badge(&self) -> &'static str {
        match self {
            ProjectPolicy::Standard => "Manual Progress Check",
            ProjectPolicy::LargeProject => "Decensat Smart Escrow",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProjectPolicy::Standard => {
                "Decensat Standard Policy: Connect manually with Google Calendar to sync project milestones and trigger payments."
            }
            ProjectPolicy::LargeProject => {
                "Decensat Large Project Policy: Automated monthly progress checks and payment tranches enabled via Sovereign AI."
            }
        }
    }
}

/// Immutable project parameters
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{Project, ProjectPolicy};
///
/// let project = Project::new(
///     "Orbital Relay".to_string(),
///     90,
///     900_000, // $9,000.00
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// );
/// assert_eq!(project.policy(), ProjectPolicy::LargeProject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier (UUID)
    id: String,

    /// Display name
    name: String,

    /// Total duration in days
    duration_days: u32,

    /// Total budget (i64 cents)
    budget: i64,

    /// First day of the project
    start_date: NaiveDate,
}

impl Project {
    /// Create a new project with a fresh id
    ///
    /// Parameters are not range-checked here; the scheduler rejects a zero
    /// duration or a negative budget with `InvalidProjectParameters`.
    pub fn new(name: String, duration_days: u32, budget: i64, start_date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            duration_days,
            budget,
            start_date,
        }
    }

    /// Create project from snapshot (for checkpoint restoration)
    pub fn from_snapshot(
        id: String,
        name: String,
        duration_days: u32,
        budget: i64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            duration_days,
            budget,
            start_date,
        }
    }

    /// Get project id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get duration in days
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Get budget (i64 cents)
    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Get start date
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Scheduling policy for this project
    pub fn policy(&self) -> ProjectPolicy {
        ProjectPolicy::for_duration(self.duration_days)
    }

    pub fn is_large(&self) -> bool {
        self.policy() == ProjectPolicy::LargeProject
    }
}
