//! Milestone Treasury Core - Rust Engine
//!
//! Schedules project budgets into payment milestones, releases tranches one
//! at a time and derives the treasury figures a dashboard shows.
//!
//! # Architecture
//!
//! - **core**: Calendar arithmetic and money formatting
//! - **models**: Domain types (Project, Milestone, Event, ProjectSetup)
//! - **scheduler**: Project → milestone schedule
//! - **treasury**: Paid, remaining, progress and disbursement series
//! - **settlement**: Tranche release state machine
//! - **ledger**: Single owner of a project's treasury state, checkpoints
//! - **advisory**: External AI guidance and chat, with fallbacks
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. Milestone amounts always sum to the budget exactly
//! 3. Exactly one milestone is current until every tranche is released
//! 4. Advisory failures never reach core state

// Module declarations
pub mod advisory;
pub mod core;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod settlement;
pub mod treasury;

// Re-exports for convenience
pub use crate::core::calendar::ScheduleCalendar;
pub use ledger::{LedgerError, LedgerSnapshot, ReleaseOutcome, SharedLedger, TreasuryLedger};
pub use models::{
    event::{Event, EventLog},
    milestone::{Milestone, MilestoneError, MilestoneStatus},
    project::{Project, ProjectPolicy},
    setup::{ProjectSetup, SetupError},
};
pub use scheduler::{schedule, ScheduleError};
pub use settlement::{release_next_tranche, SettlementError, TrancheReceipt};
pub use treasury::{DisbursementPoint, TreasurySummary};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn milestone_treasury_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init_logging(logging::DEFAULT_LOG_FILTER);
    m.add_class::<ffi::treasury::PyTreasury>()?;
    Ok(())
}
