//! Treasury Aggregator
//!
//! Pure derivations over the current milestone list. Nothing here is
//! stored: every value is recomputed from the list on each read, so the
//! aggregates can never drift from the milestones they describe.
//!
//! # Critical Invariants
//!
//! - **Total**: every function returns a value for every list, including
//!   the empty one
//! - **Bounded**: `0 <= paid <= budget`, `0 <= progress <= 100`
//! - **Monotone Series**: cumulative paid never decreases along the series

use crate::models::milestone::Milestone;
use crate::models::project::Project;
use serde::{Deserialize, Serialize};

/// One point of the cumulative disbursement chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisbursementPoint {
    /// Axis label, `P{id}`
    pub label: String,

    /// Total released up to and including this milestone (i64 cents)
    pub cumulative_paid: i64,

    /// Project budget (i64 cents), the chart's ceiling
    pub total_budget: i64,
}

/// Read-only treasury view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasurySummary {
    /// Released so far (i64 cents)
    pub paid_amount: i64,

    /// Budget not yet released (i64 cents)
    pub remaining_balance: i64,

    /// Completed milestones as a percentage of all milestones
    pub progress_percentage: f64,

    pub disbursement_series: Vec<DisbursementPoint>,

    pub completed_count: usize,
    pub milestone_count: usize,

    /// Id of the current milestone, `None` once every tranche is released
    pub current_milestone_id: Option<u32>,
}

/// Sum of tranche amounts over completed milestones
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use milestone_treasury_core_rs::{schedule, treasury};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let milestones = schedule(90, 900_000, start).unwrap();
/// assert_eq!(treasury::paid_amount(&milestones), 0);
/// ```
pub fn paid_amount(milestones: &[Milestone]) -> i64 {
    milestones
        .iter()
        .filter(|m| m.is_completed())
        .map(|m| m.payment_amount())
        .sum()
}

/// Budget minus paid amount, floored at zero
pub fn remaining_balance(project: &Project, milestones: &[Milestone]) -> i64 {
    (project.budget() - paid_amount(milestones)).max(0)
}

/// Completed count over total count, as a percentage in [0, 100]
///
/// Returns 0 for an empty list.
pub fn progress_percentage(milestones: &[Milestone]) -> f64 {
    if milestones.is_empty() {
        return 0.0;
    }
    let completed = completed_count(milestones);
    (completed as f64 / milestones.len() as f64) * 100.0
}

/// Cumulative released amount per milestone, in ascending id order
///
/// The running sum only grows at completed milestones, so the series
/// reads as a step chart of payments released against the budget.
pub fn disbursement_series(milestones: &[Milestone], budget: i64) -> Vec<DisbursementPoint> {
    let mut ordered: Vec<&Milestone> = milestones.iter().collect();
    ordered.sort_by_key(|m| m.id());

    let mut cumulative = 0i64;
    ordered
        .into_iter()
        .map(|m| {
            if m.is_completed() {
                cumulative += m.payment_amount();
            }
            DisbursementPoint {
                label: format!("P{}", m.id()),
                cumulative_paid: cumulative,
                total_budget: budget,
            }
        })
        .collect()
}

pub fn completed_count(milestones: &[Milestone]) -> usize {
    milestones.iter().filter(|m| m.is_completed()).count()
}

/// Id of the milestone currently awaiting release
pub fn current_milestone_id(milestones: &[Milestone]) -> Option<u32> {
    milestones.iter().find(|m| m.is_current()).map(|m| m.id())
}

/// Compute the full read-only view in one pass over the aggregates
pub fn summarize(project: &Project, milestones: &[Milestone]) -> TreasurySummary {
    TreasurySummary {
        paid_amount: paid_amount(milestones),
        remaining_balance: remaining_balance(project, milestones),
        progress_percentage: progress_percentage(milestones),
        disbursement_series: disbursement_series(milestones, project.budget()),
        completed_count: completed_count(milestones),
        milestone_count: milestones.len(),
        current_milestone_id: current_milestone_id(milestones),
    }
}
