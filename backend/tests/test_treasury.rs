//! Treasury Aggregator Tests
//!
//! Aggregates are derived from the milestone list on every read; these
//! tests drive lists through the state machine and check each view.

use chrono::NaiveDate;
use milestone_treasury_core_rs::treasury::{
    completed_count, current_milestone_id, disbursement_series, paid_amount,
    progress_percentage, remaining_balance, summarize,
};
use milestone_treasury_core_rs::{
    release_next_tranche, schedule, Milestone, MilestoneStatus, Project,
};

fn project(duration_days: u32, budget: i64) -> Project {
    Project::new(
        "Orbital Relay".to_string(),
        duration_days,
        budget,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
}

fn release_times(mut milestones: Vec<Milestone>, times: usize) -> Vec<Milestone> {
    for _ in 0..times {
        milestones = release_next_tranche(&milestones).unwrap().milestones;
    }
    milestones
}

#[test]
fn test_fresh_schedule_has_nothing_paid() {
    let project = project(90, 900_000);
    let milestones = schedule(90, 900_000, project.start_date()).unwrap();

    assert_eq!(paid_amount(&milestones), 0);
    assert_eq!(remaining_balance(&project, &milestones), 900_000);
    assert_eq!(progress_percentage(&milestones), 0.0);
    assert_eq!(completed_count(&milestones), 0);
    assert_eq!(current_milestone_id(&milestones), Some(1));
}

#[test]
fn test_two_of_three_released() {
    let project = project(90, 900_000);
    let milestones = release_times(schedule(90, 900_000, project.start_date()).unwrap(), 2);

    assert_eq!(paid_amount(&milestones), 600_000);
    assert_eq!(remaining_balance(&project, &milestones), 300_000);
    assert!((progress_percentage(&milestones) - 66.666_666).abs() < 0.001);
    assert_eq!(current_milestone_id(&milestones), Some(3));
}

#[test]
fn test_everything_released() {
    let project = project(100, 100_000);
    let milestones = release_times(schedule(100, 100_000, project.start_date()).unwrap(), 4);

    assert_eq!(paid_amount(&milestones), 100_000);
    assert_eq!(remaining_balance(&project, &milestones), 0);
    assert_eq!(progress_percentage(&milestones), 100.0);
    assert_eq!(current_milestone_id(&milestones), None);
}

#[test]
fn test_disbursement_series_is_cumulative_step_chart() {
    let project = project(120, 400_000);
    let milestones = release_times(schedule(120, 400_000, project.start_date()).unwrap(), 2);

    let series = disbursement_series(&milestones, project.budget());
    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    let paid: Vec<i64> = series.iter().map(|p| p.cumulative_paid).collect();

    assert_eq!(labels, vec!["P1", "P2", "P3", "P4"]);
    assert_eq!(paid, vec![100_000, 200_000, 200_000, 200_000]);
    assert!(series.iter().all(|p| p.total_budget == 400_000));
}

#[test]
fn test_disbursement_series_orders_by_id() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let shuffled = vec![
        Milestone::from_snapshot(2, "b".into(), MilestoneStatus::Current, start, 50),
        Milestone::from_snapshot(1, "a".into(), MilestoneStatus::Completed, start, 50),
    ];

    let series = disbursement_series(&shuffled, 100);
    assert_eq!(series[0].label, "P1");
    assert_eq!(series[0].cumulative_paid, 50);
    assert_eq!(series[1].label, "P2");
    assert_eq!(series[1].cumulative_paid, 50);
}

#[test]
fn test_empty_list_is_total() {
    let project = project(30, 1_000);

    assert_eq!(paid_amount(&[]), 0);
    assert_eq!(remaining_balance(&project, &[]), 1_000);
    assert_eq!(progress_percentage(&[]), 0.0);
    assert!(disbursement_series(&[], 1_000).is_empty());
    assert_eq!(current_milestone_id(&[]), None);
}

#[test]
fn test_summary_matches_individual_aggregates() {
    let project = project(90, 900_000);
    let milestones = release_times(schedule(90, 900_000, project.start_date()).unwrap(), 1);

    let summary = summarize(&project, &milestones);
    assert_eq!(summary.paid_amount, paid_amount(&milestones));
    assert_eq!(summary.remaining_balance, 600_000);
    assert_eq!(summary.completed_count, 1);
    assert_eq!(summary.milestone_count, 3);
    assert_eq!(summary.current_milestone_id, Some(2));
    assert_eq!(summary.disbursement_series.len(), 3);
}
