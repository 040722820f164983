//! Milestone model
//!
//! Represents one payment checkpoint in a project's schedule.
//! Each milestone has:
//! - Sequence id (1-based, contiguous within a project)
//! - Descriptive label
//! - Due date (project start + id * 30 days)
//! - Payment amount (i64 cents)
//! - Status (Pending, Current, Completed)
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milestone status
///
/// Lifecycle is strictly linear: `Pending -> Current -> Completed`.
/// No skipping, no reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    /// Waiting for earlier milestones to settle
    Pending,

    /// Next milestone to be released
    Current,

    /// Tranche released
    Completed,
}

impl MilestoneStatus {
    /// Lowercase name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::Current => "current",
            MilestoneStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during milestone status transitions
#[derive(Debug, Error, PartialEq)]
pub enum MilestoneError {
    #[error("Milestone {id} cannot be promoted from {status}")]
    NotPending { id: u32, status: MilestoneStatus },

    #[error("Milestone {id} cannot be completed from {status}")]
    NotCurrent { id: u32, status: MilestoneStatus },
}

/// A payment checkpoint within a project schedule
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{Milestone, MilestoneStatus};
///
/// let ms = Milestone::new(
///     1,
///     "Standard Delivery Window".to_string(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     450_000, // $4,500.00 in cents
/// );
/// assert_eq!(ms.status(), MilestoneStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Sequence number (1-based)
    id: u32,

    /// Human readable label
    label: String,

    /// Current status
    status: MilestoneStatus,

    /// Date the milestone falls due
    due_date: NaiveDate,

    /// Tranche amount (i64 cents)
    payment_amount: i64,
}

impl Milestone {
    /// Create a new pending milestone
    ///
    /// # Panics
    /// Panics if `id` is zero or `payment_amount` is negative
    pub fn new(id: u32, label: String, due_date: NaiveDate, payment_amount: i64) -> Self {
        assert!(id > 0, "milestone id must be 1-based");
        assert!(payment_amount >= 0, "payment_amount must be non-negative");

        Self {
            id,
            label,
            status: MilestoneStatus::Pending,
            due_date,
            payment_amount,
        }
    }

    /// Create milestone from snapshot (for checkpoint restoration)
    ///
    /// No checks are applied here; restored lists are validated as a whole
    /// by [`crate::settlement::validate_milestones`].
    pub fn from_snapshot(
        id: u32,
        label: String,
        status: MilestoneStatus,
        due_date: NaiveDate,
        payment_amount: i64,
    ) -> Self {
        Self {
            id,
            label,
            status,
            due_date,
            payment_amount,
        }
    }

    /// Set the initial status (builder pattern)
    ///
    /// Used by the scheduler to mark the first milestone current.
    pub fn with_status(mut self, status: MilestoneStatus) -> Self {
        self.status = status;
        self
    }

    /// Get milestone id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get current status
    pub fn status(&self) -> MilestoneStatus {
        self.status
    }

    /// Get due date
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Get tranche amount (i64 cents)
    pub fn payment_amount(&self) -> i64 {
        self.payment_amount
    }

    pub fn is_pending(&self) -> bool {
        self.status == MilestoneStatus::Pending
    }

    pub fn is_current(&self) -> bool {
        self.status == MilestoneStatus::Current
    }

    pub fn is_completed(&self) -> bool {
        self.status == MilestoneStatus::Completed
    }

    /// Move `Pending -> Current`
    pub(crate) fn promote(&mut self) -> Result<(), MilestoneError> {
        if self.status != MilestoneStatus::Pending {
            return Err(MilestoneError::NotPending {
                id: self.id,
                status: self.status,
            });
        }
        self.status = MilestoneStatus::Current;
        Ok(())
    }

    /// Move `Current -> Completed`
    pub(crate) fn complete(&mut self) -> Result<(), MilestoneError> {
        if self.status != MilestoneStatus::Current {
            return Err(MilestoneError::NotCurrent {
                id: self.id,
                status: self.status,
            });
        }
        self.status = MilestoneStatus::Completed;
        Ok(())
    }
}
