//! Tranche release state machine
//!
//! Each milestone walks `pending → current → completed`. A release
//! completes the single current milestone and promotes the one with the
//! next id. When no milestone follows, the schedule is terminal: every
//! milestone completed, none current.
//!
//! # Release Flow
//!
//! ```text
//! [completed, current, pending]  --release-->  [completed, completed, current]
//! [completed, completed, current] --release--> [completed, completed, completed]
//! [completed, completed, completed] --release--> NothingToRelease (unchanged)
//! ```
//!
//! # Critical Invariants
//!
//! - **Atomicity**: the new list is built off to the side and handed back
//!   whole; the input is never touched, so no caller can see a milestone
//!   completed without its successor promoted
//! - **Single Current**: exactly one current milestone until terminal
//! - **No Gaps**: completed milestones precede current, pending follow it

use crate::models::milestone::{Milestone, MilestoneError, MilestoneStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tranche release
#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    #[error("Nothing to release: no milestone is current")]
    NothingToRelease,

    #[error("Milestone invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Milestone error: {0}")]
    MilestoneError(#[from] MilestoneError),
}

/// Details of one released tranche
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrancheReceipt {
    /// Milestone that moved to completed
    pub milestone_id: u32,

    /// Amount released (i64 cents)
    pub amount: i64,

    /// Milestone promoted to current, `None` if the schedule is now terminal
    pub promoted: Option<u32>,
}

/// Result of a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// The whole updated milestone list
    pub milestones: Vec<Milestone>,

    pub receipt: TrancheReceipt,
}

impl Release {
    /// True when the release completed the final milestone
    pub fn is_terminal(&self) -> bool {
        self.receipt.promoted.is_none()
    }
}

/// Release the current milestone's tranche
///
/// # Returns
///
/// - `Ok(Release)` with the new list and a receipt
/// - `Err(SettlementError::NothingToRelease)` if no milestone is current
///   (terminal schedule or empty list); this is a no-op, not a failure
/// - `Err(SettlementError::MilestoneError)` if the successor is not pending
///
/// In every error case the input list is left as it was.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{release_next_tranche, schedule, MilestoneStatus};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let milestones = schedule(90, 900_000, start).unwrap();
///
/// let release = release_next_tranche(&milestones).unwrap();
/// assert_eq!(release.receipt.milestone_id, 1);
/// assert_eq!(release.receipt.promoted, Some(2));
/// assert_eq!(release.milestones[0].status(), MilestoneStatus::Completed);
/// assert_eq!(release.milestones[1].status(), MilestoneStatus::Current);
///
/// // Input untouched
/// assert_eq!(milestones[0].status(), MilestoneStatus::Current);
/// ```
pub fn release_next_tranche(milestones: &[Milestone]) -> Result<Release, SettlementError> {
    let current_idx = milestones
        .iter()
        .position(|m| m.is_current())
        .ok_or(SettlementError::NothingToRelease)?;

    let mut next = milestones.to_vec();

    let current_id = next[current_idx].id();
    let amount = next[current_idx].payment_amount();
    next[current_idx].complete()?;

    let mut promoted = None;
    let successor_id = current_id.checked_add(1);
    if let Some(successor) = next
        .iter_mut()
        .find(|m| successor_id == Some(m.id()))
    {
        successor.promote()?;
        promoted = Some(successor.id());
    }

    Ok(Release {
        milestones: next,
        receipt: TrancheReceipt {
            milestone_id: current_id,
            amount,
            promoted,
        },
    })
}

/// True when no milestone is left to release
pub fn is_terminal(milestones: &[Milestone]) -> bool {
    milestones.iter().all(|m| m.is_completed())
}

/// Check the structural invariants of a milestone list
///
/// - ids are exactly 1..=N in list order
/// - amounts are non-negative
/// - statuses read `completed* current pending*`, or all completed
///
/// Used when restoring a list from a checkpoint; lists produced by the
/// scheduler and this state machine always pass.
pub fn validate_milestones(milestones: &[Milestone]) -> Result<(), SettlementError> {
    let mut seen_current = false;

    for (idx, milestone) in milestones.iter().enumerate() {
        let expected_id = idx as u32 + 1;
        if milestone.id() != expected_id {
            return Err(SettlementError::InvariantViolation(format!(
                "expected milestone id {} at position {}, found {}",
                expected_id, idx, milestone.id()
            )));
        }

        if milestone.payment_amount() < 0 {
            return Err(SettlementError::InvariantViolation(format!(
                "milestone {} has negative amount {}",
                milestone.id(),
                milestone.payment_amount()
            )));
        }

        match milestone.status() {
            MilestoneStatus::Completed if seen_current => {
                return Err(SettlementError::InvariantViolation(format!(
                    "milestone {} completed after the current milestone",
                    milestone.id()
                )));
            }
            MilestoneStatus::Completed => {}
            MilestoneStatus::Current if seen_current => {
                return Err(SettlementError::InvariantViolation(format!(
                    "milestone {} is a second current milestone",
                    milestone.id()
                )));
            }
            MilestoneStatus::Current => seen_current = true,
            MilestoneStatus::Pending if !seen_current => {
                return Err(SettlementError::InvariantViolation(format!(
                    "milestone {} is pending with no current milestone before it",
                    milestone.id()
                )));
            }
            MilestoneStatus::Pending => {}
        }
    }

    Ok(())
}
