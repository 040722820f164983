//! Treasury ledger
//!
//! The ledger owns one project, its milestone list and the append-only
//! settlement history. It is the only place the milestone list changes:
//!
//! 1. `new` runs the scheduler once and logs `ProjectScheduled`
//! 2. `release_next_tranche` runs the state machine, swaps in the new list
//!    and logs `TrancheReleased` (plus `ProjectCompleted` on the last one)
//! 3. everything else reads through the aggregator
//!
//! # Critical Invariants
//!
//! - **Whole-List Swap**: the milestone list is replaced in one assignment,
//!   never edited in place
//! - **Exact Sum**: Σ payment_amount == budget for the lifetime of the ledger
//! - **History Matches State**: Σ released amounts in the log == paid amount

use crate::ledger::checkpoint::{self, LedgerSnapshot};
use crate::models::event::{Event, EventLog};
use crate::models::milestone::Milestone;
use crate::models::project::Project;
use crate::models::setup::{ProjectSetup, SetupError};
use crate::scheduler::{self, ScheduleError};
use crate::settlement::{self, SettlementError, TrancheReceipt};
use crate::treasury::{self, DisbursementPoint, TreasurySummary};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the ledger
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Settlement error: {0}")]
    Settlement(#[from] SettlementError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("State validation error: {0}")]
    StateValidation(String),
}

/// Result of a release request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A tranche was released
    Released(TrancheReceipt),

    /// No milestone was current; the ledger is unchanged
    NothingToRelease,
}

impl ReleaseOutcome {
    pub fn receipt(&self) -> Option<&TrancheReceipt> {
        match self {
            ReleaseOutcome::Released(receipt) => Some(receipt),
            ReleaseOutcome::NothingToRelease => None,
        }
    }
}

/// Treasury state of one project
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{Project, ReleaseOutcome, TreasuryLedger};
///
/// let project = Project::new(
///     "Orbital Relay".to_string(),
///     90,
///     900_000,
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// );
/// let mut ledger = TreasuryLedger::new(project).unwrap();
///
/// ledger.release_next_tranche().unwrap();
/// ledger.release_next_tranche().unwrap();
///
/// let summary = ledger.summary();
/// assert_eq!(summary.paid_amount, 600_000);
/// assert_eq!(summary.current_milestone_id, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TreasuryLedger {
    /// Immutable project parameters
    project: Project,

    /// Current milestone list (replaced whole on every release)
    milestones: Vec<Milestone>,

    /// Settlement history
    event_log: EventLog,

    /// Number of release actions applied so far
    release_sequence: u64,
}

impl TreasuryLedger {
    /// Schedule a project and open its ledger
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Schedule` if the project has a zero duration
    /// or a negative budget.
    pub fn new(project: Project) -> Result<Self, LedgerError> {
        let milestones = scheduler::schedule_project(&project)?;

        let mut event_log = EventLog::new();
        event_log.log(Event::ProjectScheduled {
            sequence: 0,
            project_id: project.id().to_string(),
            milestone_count: milestones.len(),
            budget: project.budget(),
        });

        tracing::info!(
            project_id = project.id(),
            project = project.name(),
            duration_days = project.duration_days(),
            budget = project.budget(),
            milestones = milestones.len(),
            "project scheduled"
        );

        Ok(Self {
            project,
            milestones,
            event_log,
            release_sequence: 0,
        })
    }

    /// Validate a setup form and open a ledger for the resulting project
    pub fn from_setup(setup: ProjectSetup, start_date: NaiveDate) -> Result<Self, LedgerError> {
        let project = setup.into_project(start_date)?;
        Self::new(project)
    }

    /// Reassemble a ledger from already-validated parts
    pub(crate) fn from_parts(
        project: Project,
        milestones: Vec<Milestone>,
        event_log: EventLog,
        release_sequence: u64,
    ) -> Self {
        Self {
            project,
            milestones,
            event_log,
            release_sequence,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Number of release actions applied so far (including rejected ones)
    pub fn release_sequence(&self) -> u64 {
        self.release_sequence
    }

    /// True when every milestone is completed
    pub fn is_terminal(&self) -> bool {
        settlement::is_terminal(&self.milestones)
    }

    /// Release the tranche of the current milestone
    ///
    /// Releasing a terminal ledger is a no-op that returns
    /// `ReleaseOutcome::NothingToRelease` and logs `ReleaseRejected`;
    /// the milestone list is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Settlement` only if the milestone list is
    /// structurally broken; the list is left untouched in that case.
    pub fn release_next_tranche(&mut self) -> Result<ReleaseOutcome, LedgerError> {
        let sequence = self.release_sequence + 1;

        let release = match settlement::release_next_tranche(&self.milestones) {
            Ok(release) => release,
            Err(SettlementError::NothingToRelease) => {
                self.release_sequence = sequence;
                self.event_log.log(Event::ReleaseRejected {
                    sequence,
                    reason: SettlementError::NothingToRelease.to_string(),
                });
                tracing::debug!(
                    project_id = self.project.id(),
                    sequence,
                    "release requested with no current milestone"
                );
                return Ok(ReleaseOutcome::NothingToRelease);
            }
            Err(e) => return Err(e.into()),
        };

        let terminal = release.is_terminal();
        let receipt = release.receipt.clone();

        // Single assignment: readers see the old list or the new one
        self.milestones = release.milestones;
        self.release_sequence = sequence;

        self.event_log.log(Event::TrancheReleased {
            sequence,
            milestone_id: receipt.milestone_id,
            amount: receipt.amount,
            promoted: receipt.promoted,
        });

        tracing::info!(
            project_id = self.project.id(),
            sequence,
            milestone_id = receipt.milestone_id,
            amount = receipt.amount,
            "tranche released"
        );

        if terminal {
            let total_paid = self.paid_amount();
            self.event_log.log(Event::ProjectCompleted {
                sequence,
                total_paid,
            });
            tracing::info!(
                project_id = self.project.id(),
                total_paid,
                "all milestones settled"
            );
        }

        Ok(ReleaseOutcome::Released(receipt))
    }

    pub fn paid_amount(&self) -> i64 {
        treasury::paid_amount(&self.milestones)
    }

    pub fn remaining_balance(&self) -> i64 {
        treasury::remaining_balance(&self.project, &self.milestones)
    }

    pub fn progress_percentage(&self) -> f64 {
        treasury::progress_percentage(&self.milestones)
    }

    pub fn disbursement_series(&self) -> Vec<DisbursementPoint> {
        treasury::disbursement_series(&self.milestones, self.project.budget())
    }

    /// Read-only view for the presentation layer
    pub fn summary(&self) -> TreasurySummary {
        treasury::summarize(&self.project, &self.milestones)
    }

    /// Capture the ledger as a snapshot
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        LedgerSnapshot::capture(self)
    }

    /// Restore a ledger from a snapshot, re-checking every invariant
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        checkpoint::validate_snapshot(&snapshot)?;
        Ok(snapshot.into_ledger())
    }

    /// Serialize the ledger to checkpoint JSON
    pub fn save_checkpoint(&self) -> Result<String, LedgerError> {
        let snapshot = self.snapshot()?;
        serde_json::to_string(&snapshot).map_err(|e| {
            LedgerError::Serialization(format!("Checkpoint serialization failed: {}", e))
        })
    }

    /// Restore a ledger from checkpoint JSON
    pub fn load_checkpoint(json: &str) -> Result<Self, LedgerError> {
        let snapshot: LedgerSnapshot = serde_json::from_str(json).map_err(|e| {
            LedgerError::Serialization(format!("Checkpoint deserialization failed: {}", e))
        })?;
        Self::from_snapshot(snapshot)
    }
}

/// Ledger shared between tasks
///
/// Releases take the write lock for the duration of one whole-list swap;
/// readers take the read lock, so no reader sees a half-applied release.
/// Advisory calls never touch the ledger, so a chat send can be in flight
/// while a tranche is released.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<TreasuryLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: TreasuryLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Release the next tranche under the write lock
    pub fn release_next_tranche(&self) -> Result<ReleaseOutcome, LedgerError> {
        self.inner.write().release_next_tranche()
    }

    pub fn summary(&self) -> TreasurySummary {
        self.inner.read().summary()
    }

    /// Copy of the current milestone list
    pub fn milestones(&self) -> Vec<Milestone> {
        self.inner.read().milestones().to_vec()
    }

    /// Run a closure against a consistent view of the ledger
    pub fn read<R>(&self, f: impl FnOnce(&TreasuryLedger) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn save_checkpoint(&self) -> Result<String, LedgerError> {
        self.inner.read().save_checkpoint()
    }
}

impl From<TreasuryLedger> for SharedLedger {
    fn from(ledger: TreasuryLedger) -> Self {
        Self::new(ledger)
    }
}
