//! Scheduler Tests
//!
//! Critical invariants tested:
//! - Exact sum: milestone amounts add up to the budget to the cent
//! - Policy boundary: 89 days is standard, 90 days is large
//! - Initial state: milestone 1 current, everything else pending

use chrono::NaiveDate;
use milestone_treasury_core_rs::scheduler::{
    milestone_count, schedule_project, split_budget, STANDARD_MILESTONE_LABEL,
};
use milestone_treasury_core_rs::{schedule, MilestoneStatus, Project, ScheduleError};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

#[test]
fn test_standard_project_single_milestone() {
    // 30 days, $4,500
    let milestones = schedule(30, 450_000, start()).unwrap();

    assert_eq!(milestones.len(), 1);
    let only = &milestones[0];
    assert_eq!(only.id(), 1);
    assert_eq!(only.label(), STANDARD_MILESTONE_LABEL);
    assert_eq!(only.status(), MilestoneStatus::Current);
    assert_eq!(only.payment_amount(), 450_000);
    assert_eq!(only.due_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
}

#[test]
fn test_large_project_three_phases() {
    // 90 days, $9,000
    let milestones = schedule(90, 900_000, start()).unwrap();

    assert_eq!(milestones.len(), 3);
    let labels: Vec<&str> = milestones.iter().map(|m| m.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Phase 1: 30 Day Progress Check",
            "Phase 2: 60 Day Progress Check",
            "Phase 3: 90 Day Progress Check",
        ]
    );
    for m in &milestones {
        assert_eq!(m.payment_amount(), 300_000);
    }
    assert_eq!(milestones[0].status(), MilestoneStatus::Current);
    assert_eq!(milestones[1].status(), MilestoneStatus::Pending);
    assert_eq!(milestones[2].status(), MilestoneStatus::Pending);
}

#[test]
fn test_uneven_duration_rounds_phases_up() {
    // 100 days, $1,000 → 4 phases of $250
    let milestones = schedule(100, 100_000, start()).unwrap();

    assert_eq!(milestones.len(), 4);
    assert!(milestones.iter().all(|m| m.payment_amount() == 25_000));
    assert_eq!(milestones[3].label(), "Phase 4: 120 Day Progress Check");
    assert_eq!(
        milestones[3].due_date(),
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    );
}

#[test]
fn test_policy_boundary_at_ninety_days() {
    assert_eq!(schedule(89, 890_000, start()).unwrap().len(), 1);
    assert_eq!(schedule(90, 900_000, start()).unwrap().len(), 3);
    assert_eq!(milestone_count(89), 1);
    assert_eq!(milestone_count(90), 3);
    assert_eq!(milestone_count(91), 4);
}

#[test]
fn test_remainder_lands_on_final_milestone() {
    // $1000.01 over 3 phases
    let milestones = schedule(90, 100_001, start()).unwrap();
    let amounts: Vec<i64> = milestones.iter().map(|m| m.payment_amount()).collect();
    assert_eq!(amounts, vec![33_333, 33_333, 33_335]);

    let milestones = schedule(120, 100_003, start()).unwrap();
    let amounts: Vec<i64> = milestones.iter().map(|m| m.payment_amount()).collect();
    assert_eq!(amounts, vec![25_000, 25_000, 25_000, 25_003]);
    assert_eq!(amounts.iter().sum::<i64>(), 100_003);
}

#[test]
fn test_split_budget_small_amounts() {
    assert_eq!(split_budget(2, 3), vec![0, 0, 2]);
    assert_eq!(split_budget(0, 4), vec![0, 0, 0, 0]);
}

#[test]
fn test_zero_budget_is_valid() {
    let milestones = schedule(120, 0, start()).unwrap();
    assert_eq!(milestones.len(), 4);
    assert!(milestones.iter().all(|m| m.payment_amount() == 0));
}

#[test]
fn test_ids_are_contiguous_and_ordered() {
    let milestones = schedule(365, 5_475_000, start()).unwrap();
    assert_eq!(milestones.len(), 13);
    for (idx, m) in milestones.iter().enumerate() {
        assert_eq!(m.id(), idx as u32 + 1);
    }
}

#[test]
fn test_zero_duration_rejected() {
    let result = schedule(0, 100_000, start());
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidProjectParameters(_))
    ));
}

#[test]
fn test_negative_budget_rejected() {
    let result = schedule(30, -1, start());
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidProjectParameters(_))
    ));
}

#[test]
fn test_due_date_out_of_range_rejected() {
    let result = schedule(30, 100, NaiveDate::MAX);
    assert!(result.is_err());
}

#[test]
fn test_max_duration_returns_error_instead_of_allocating() {
    let result = schedule(u32::MAX, 100, start());
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidProjectParameters(_))
    ));
}

#[test]
fn test_schedule_project_uses_project_fields() {
    let project = Project::new("Orbital Relay".to_string(), 90, 900_000, start());
    let milestones = schedule_project(&project).unwrap();
    assert_eq!(milestones, schedule(90, 900_000, start()).unwrap());
}
