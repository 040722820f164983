//! Settlement Module
//!
//! Implements the tranche release state machine:
//! - Complete the current milestone
//! - Promote the next milestone to current
//! - Report terminal schedules as `NothingToRelease`
//!
//! # Critical Invariants
//!
//! 1. **Atomicity**: Release is all-or-nothing (complete AND promote, or neither)
//! 2. **Linear Lifecycle**: pending → current → completed, no skipping, no reversal
//! 3. **Idempotent Terminal**: releasing a terminal schedule changes nothing
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use milestone_treasury_core_rs::{schedule, settlement};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let milestones = schedule(30, 450_000, start).unwrap();
//!
//! let release = settlement::release_next_tranche(&milestones).unwrap();
//! assert!(release.is_terminal());
//! assert_eq!(
//!     settlement::release_next_tranche(&release.milestones),
//!     Err(settlement::SettlementError::NothingToRelease)
//! );
//! ```

pub mod tranche;

// Re-export public API
pub use tranche::{
    is_terminal, release_next_tranche, validate_milestones, Release, SettlementError,
    TrancheReceipt,
};
