//! Checkpoint Tests - Save/Load Ledger State
//!
//! Critical invariants tested:
//! - Round trip: a restored ledger equals the one saved
//! - Restored ledgers keep settling from where they stopped
//! - Tampered snapshots are rejected (hash, sum, structure, history)

use chrono::NaiveDate;
use milestone_treasury_core_rs::ledger::checkpoint::compute_project_hash;
use milestone_treasury_core_rs::{
    Event, LedgerError, LedgerSnapshot, MilestoneStatus, Project, TreasuryLedger,
};

fn create_ledger() -> TreasuryLedger {
    let project = Project::new(
        "Orbital Relay".to_string(),
        120,
        400_000,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );
    TreasuryLedger::new(project).unwrap()
}

fn ledger_after_releases(count: usize) -> TreasuryLedger {
    let mut ledger = create_ledger();
    for _ in 0..count {
        ledger.release_next_tranche().unwrap();
    }
    ledger
}

fn assert_state_validation(result: Result<TreasuryLedger, LedgerError>) {
    match result {
        Err(LedgerError::StateValidation(_)) => {}
        other => panic!("Expected StateValidation error, got {:?}", other),
    }
}

#[test]
fn test_round_trip_preserves_ledger() {
    let ledger = ledger_after_releases(2);

    let json = ledger.save_checkpoint().unwrap();
    let restored = TreasuryLedger::load_checkpoint(&json).unwrap();

    assert_eq!(restored, ledger);
    assert_eq!(restored.summary(), ledger.summary());
}

#[test]
fn test_restored_ledger_continues_settling() {
    let json = ledger_after_releases(2).save_checkpoint().unwrap();
    let mut restored = TreasuryLedger::load_checkpoint(&json).unwrap();

    let receipt = restored.release_next_tranche().unwrap();
    assert_eq!(receipt.receipt().unwrap().milestone_id, 3);
    assert_eq!(restored.release_sequence(), 3);
    assert_eq!(restored.paid_amount(), 300_000);
}

#[test]
fn test_terminal_ledger_round_trips() {
    let ledger = ledger_after_releases(5); // last one rejected
    let json = ledger.save_checkpoint().unwrap();
    let restored = TreasuryLedger::load_checkpoint(&json).unwrap();

    assert!(restored.is_terminal());
    assert_eq!(restored.event_log().len(), ledger.event_log().len());
}

#[test]
fn test_malformed_json_rejected() {
    let result = TreasuryLedger::load_checkpoint("{ not json");
    assert!(matches!(result, Err(LedgerError::Serialization(_))));
}

#[test]
fn test_hash_mismatch_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.project.budget = 800_000;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_amount_tampering_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.milestones[3].payment_amount += 1;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_two_current_milestones_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.milestones[2].status = MilestoneStatus::Current;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_id_gap_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.milestones[3].id = 7;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_missing_milestone_rejected() {
    let mut snapshot = ledger_after_releases(0).snapshot().unwrap();
    let removed = snapshot.milestones.pop().unwrap();
    snapshot.milestones[2].payment_amount += removed.payment_amount;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_history_mismatch_rejected() {
    let mut snapshot: LedgerSnapshot = ledger_after_releases(2).snapshot().unwrap();
    // Drop the second TrancheReleased event
    snapshot.events.pop();

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_amount_shifted_between_milestones_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    // Sum still matches the budget, split does not
    snapshot.milestones[2].payment_amount -= 1;
    snapshot.milestones[3].payment_amount += 1;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_tampered_label_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.milestones[1].label = "x".to_string();

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_tampered_due_date_rejected() {
    let mut snapshot = ledger_after_releases(1).snapshot().unwrap();
    snapshot.milestones[0].due_date = NaiveDate::MIN;

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_overflowing_amounts_rejected() {
    // Forged project with a matching hash: budget 0, amounts that wrap to 0
    let project = Project::new(
        "Forged".to_string(),
        90,
        0,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );
    let mut snapshot = TreasuryLedger::new(project).unwrap().snapshot().unwrap();
    snapshot.milestones[0].payment_amount = i64::MAX;
    snapshot.milestones[1].payment_amount = i64::MAX;
    snapshot.milestones[2].payment_amount = 2;
    snapshot.project_hash = compute_project_hash(&snapshot.project).unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    assert_state_validation(TreasuryLedger::load_checkpoint(&json));
}

#[test]
fn test_overflowing_history_rejected() {
    let mut snapshot = ledger_after_releases(0).snapshot().unwrap();
    for (sequence, milestone_id) in [(1, 1), (2, 2)] {
        snapshot.events.push(Event::TrancheReleased {
            sequence,
            milestone_id,
            amount: i64::MAX,
            promoted: None,
        });
    }

    assert_state_validation(TreasuryLedger::from_snapshot(snapshot));
}

#[test]
fn test_checkpoint_is_plain_json() {
    let json = ledger_after_releases(1).save_checkpoint().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["project"]["budget"], 400_000);
    assert_eq!(value["milestones"][0]["status"], "completed");
    assert_eq!(value["milestones"][1]["status"], "current");
    assert_eq!(value["milestones"][0]["due_date"], "2024-01-31");
    assert_eq!(value["events"][1]["type"], "TrancheReleased");
}
