//! Checkpoint - Save/Load Ledger State
//!
//! Serializes a ledger (project, milestones, history) so it can be handed
//! across a process boundary and restored. Nothing is written to disk here;
//! callers decide where the JSON goes.
//!
//! # Critical Invariants
//!
//! - **Project Matching**: the snapshot's project hash must match its project
//! - **Exact Sum**: Σ milestone amounts == budget
//! - **Schedule Shape**: milestone count matches the duration, statuses read
//!   `completed* current pending*`
//! - **History Matches State**: Σ released amounts in the log == paid amount

use crate::ledger::engine::{LedgerError, TreasuryLedger};
use crate::models::event::{Event, EventLog};
use crate::models::milestone::{Milestone, MilestoneStatus};
use crate::models::project::Project;
use crate::scheduler;
use crate::settlement;
use crate::treasury;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub project: ProjectSnapshot,
    pub milestones: Vec<MilestoneSnapshot>,
    pub events: Vec<Event>,
    pub release_sequence: u64,

    /// SHA256 hash of the project (for validation)
    pub project_hash: String,
}

/// Project snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: String,
    pub name: String,
    pub duration_days: u32,
    pub budget: i64,
    pub start_date: NaiveDate,
}

impl From<&Project> for ProjectSnapshot {
    fn from(project: &Project) -> Self {
        ProjectSnapshot {
            id: project.id().to_string(),
            name: project.name().to_string(),
            duration_days: project.duration_days(),
            budget: project.budget(),
            start_date: project.start_date(),
        }
    }
}

impl From<ProjectSnapshot> for Project {
    fn from(snapshot: ProjectSnapshot) -> Self {
        Project::from_snapshot(
            snapshot.id,
            snapshot.name,
            snapshot.duration_days,
            snapshot.budget,
            snapshot.start_date,
        )
    }
}

/// Milestone snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSnapshot {
    pub id: u32,
    pub label: String,
    pub status: MilestoneStatus,
    pub due_date: NaiveDate,
    pub payment_amount: i64,
}

impl From<&Milestone> for MilestoneSnapshot {
    fn from(ms: &Milestone) -> Self {
        MilestoneSnapshot {
            id: ms.id(),
            label: ms.label().to_string(),
            status: ms.status(),
            due_date: ms.due_date(),
            payment_amount: ms.payment_amount(),
        }
    }
}

impl From<MilestoneSnapshot> for Milestone {
    fn from(snapshot: MilestoneSnapshot) -> Self {
        Milestone::from_snapshot(
            snapshot.id,
            snapshot.label,
            snapshot.status,
            snapshot.due_date,
            snapshot.payment_amount,
        )
    }
}

impl LedgerSnapshot {
    /// Capture the current state of a ledger
    pub fn capture(ledger: &TreasuryLedger) -> Result<Self, LedgerError> {
        let project = ProjectSnapshot::from(ledger.project());
        let project_hash = compute_project_hash(&project)?;

        Ok(LedgerSnapshot {
            project,
            milestones: ledger.milestones().iter().map(MilestoneSnapshot::from).collect(),
            events: ledger.event_log().events().to_vec(),
            release_sequence: ledger.release_sequence(),
            project_hash,
        })
    }

    /// Convert into a ledger without validation
    pub(crate) fn into_ledger(self) -> TreasuryLedger {
        TreasuryLedger::from_parts(
            self.project.into(),
            self.milestones.into_iter().map(Milestone::from).collect(),
            EventLog::from_events(self.events),
            self.release_sequence,
        )
    }
}

// ============================================================================
// Project Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a serializable value
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field or map ordering.
pub fn compute_project_hash<T: Serialize>(value: &T) -> Result<String, LedgerError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value).map_err(|e| {
        LedgerError::Serialization(format!("Project serialization failed: {}", e))
    })?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        LedgerError::Serialization(format!("Project serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate snapshot integrity
///
/// Checks, in order:
/// - Project hash
/// - Project parameters and milestone count
/// - Milestone structure (ids, status ordering)
/// - Exact budget sum (overflow counts as a mismatch)
/// - Labels, due dates and amounts match a fresh schedule of the project
/// - Released history matches paid amount
pub fn validate_snapshot(snapshot: &LedgerSnapshot) -> Result<(), LedgerError> {
    // 1. Project hash
    let expected_hash = compute_project_hash(&snapshot.project)?;
    if expected_hash != snapshot.project_hash {
        return Err(LedgerError::StateValidation(format!(
            "Project hash mismatch: expected {}, got {}",
            expected_hash, snapshot.project_hash
        )));
    }

    // 2. Project parameters and schedule length
    let project = &snapshot.project;
    if project.duration_days < 1 || project.budget < 0 {
        return Err(LedgerError::StateValidation(format!(
            "Invalid project parameters: {} days, budget {}",
            project.duration_days, project.budget
        )));
    }
    let expected_count = scheduler::milestone_count(project.duration_days) as usize;
    if snapshot.milestones.len() != expected_count {
        return Err(LedgerError::StateValidation(format!(
            "Expected {} milestones for {} days, got {}",
            expected_count,
            project.duration_days,
            snapshot.milestones.len()
        )));
    }

    // 3. Milestone structure
    let milestones: Vec<Milestone> = snapshot
        .milestones
        .iter()
        .cloned()
        .map(Milestone::from)
        .collect();
    settlement::validate_milestones(&milestones)
        .map_err(|e| LedgerError::StateValidation(e.to_string()))?;

    // 4. Exact sum
    let total = milestones
        .iter()
        .try_fold(0i64, |total, m| total.checked_add(m.payment_amount()))
        .ok_or_else(|| {
            LedgerError::StateValidation("Milestone amounts overflow i64".to_string())
        })?;
    if total != project.budget {
        return Err(LedgerError::StateValidation(format!(
            "Budget conservation violated: milestones sum to {}, budget is {}",
            total, project.budget
        )));
    }

    // 5. Schedule shape
    let expected = scheduler::schedule(project.duration_days, project.budget, project.start_date)
        .map_err(|e| LedgerError::StateValidation(e.to_string()))?;
    for (actual, scheduled) in milestones.iter().zip(&expected) {
        if actual.label() != scheduled.label()
            || actual.due_date() != scheduled.due_date()
            || actual.payment_amount() != scheduled.payment_amount()
        {
            return Err(LedgerError::StateValidation(format!(
                "Milestone {} does not match the project schedule: \
                 expected {:?} due {} for {}, got {:?} due {} for {}",
                actual.id(),
                scheduled.label(),
                scheduled.due_date(),
                scheduled.payment_amount(),
                actual.label(),
                actual.due_date(),
                actual.payment_amount()
            )));
        }
    }

    // 6. History matches state
    let released = EventLog::from_events(snapshot.events.clone())
        .total_released()
        .ok_or_else(|| {
            LedgerError::StateValidation("Released amounts in history overflow i64".to_string())
        })?;
    let paid = treasury::paid_amount(&milestones);
    if released != paid {
        return Err(LedgerError::StateValidation(format!(
            "History mismatch: log releases {}, milestones show {} paid",
            released, paid
        )));
    }

    Ok(())
}
