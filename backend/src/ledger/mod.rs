//! Ledger - the single owner of a project's treasury state
//!
//! Wraps scheduling, tranche release and aggregation behind one actor
//! that also keeps the settlement history.
//!
//! See `engine.rs` for full implementation.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{LedgerError, ReleaseOutcome, SharedLedger, TreasuryLedger};

// Re-export checkpoint types
pub use checkpoint::{LedgerSnapshot, MilestoneSnapshot, ProjectSnapshot};
