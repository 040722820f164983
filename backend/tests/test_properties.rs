//! Property Tests - Schedule and Settlement Invariants
//!
//! For arbitrary durations, budgets and release counts:
//! - Exact sum: milestone amounts add up to the budget
//! - Milestone count follows the 90-day policy boundary
//! - At most one current milestone, exactly one until terminal
//! - Paid never decreases and remaining never increases
//! - Terminal ledgers read 100% progress and zero remaining

use chrono::NaiveDate;
use milestone_treasury_core_rs::scheduler::split_budget;
use milestone_treasury_core_rs::{schedule, Project, ReleaseOutcome, TreasuryLedger};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn split_budget_sums_exactly(budget in 0_i64..1_000_000_000_000, count in 1_u32..500) {
        let parts = split_budget(budget, count);
        prop_assert_eq!(parts.len(), count as usize);
        prop_assert_eq!(parts.iter().sum::<i64>(), budget);
        prop_assert!(parts.iter().all(|p| *p >= 0));
    }

    #[test]
    fn schedule_shape_follows_policy(duration in 1_u32..2_000, budget in 0_i64..10_000_000_000) {
        let milestones = schedule(duration, budget, start()).unwrap();

        let expected = if duration >= 90 { duration.div_ceil(30) } else { 1 };
        prop_assert_eq!(milestones.len(), expected as usize);
        prop_assert_eq!(milestones.iter().map(|m| m.payment_amount()).sum::<i64>(), budget);
        prop_assert_eq!(milestones.iter().filter(|m| m.is_current()).count(), 1);
        prop_assert!(milestones[0].is_current());
    }

    #[test]
    fn releases_are_monotone(
        duration in 1_u32..400,
        budget in 0_i64..100_000_000,
        releases in 0_usize..20,
    ) {
        let project = Project::new("Prop".to_string(), duration, budget, start());
        let mut ledger = TreasuryLedger::new(project).unwrap();

        let mut last_paid = 0_i64;
        let mut last_remaining = budget;
        let mut last_progress = 0.0_f64;

        for _ in 0..releases {
            let outcome = ledger.release_next_tranche().unwrap();
            let summary = ledger.summary();

            prop_assert!(summary.paid_amount >= last_paid);
            prop_assert!(summary.remaining_balance <= last_remaining);
            prop_assert!(summary.progress_percentage >= last_progress);
            prop_assert_eq!(summary.paid_amount + summary.remaining_balance, budget);
            prop_assert_eq!(ledger.event_log().total_released(), Some(summary.paid_amount));

            let currents = ledger.milestones().iter().filter(|m| m.is_current()).count();
            if ledger.is_terminal() {
                prop_assert_eq!(currents, 0);
            } else {
                prop_assert_eq!(currents, 1);
                prop_assert!(matches!(outcome, ReleaseOutcome::Released(_)));
            }

            last_paid = summary.paid_amount;
            last_remaining = summary.remaining_balance;
            last_progress = summary.progress_percentage;
        }
    }

    #[test]
    fn terminal_ledger_is_fully_paid(duration in 1_u32..400, budget in 0_i64..100_000_000) {
        let project = Project::new("Prop".to_string(), duration, budget, start());
        let mut ledger = TreasuryLedger::new(project).unwrap();
        let count = ledger.milestones().len();

        for _ in 0..count {
            let outcome = ledger.release_next_tranche().unwrap();
            prop_assert!(matches!(outcome, ReleaseOutcome::Released(_)));
        }

        prop_assert!(ledger.is_terminal());
        let summary = ledger.summary();
        prop_assert_eq!(summary.paid_amount, budget);
        prop_assert_eq!(summary.remaining_balance, 0);
        prop_assert_eq!(summary.progress_percentage, 100.0);
        prop_assert_eq!(summary.current_milestone_id, None);

        let extra = ledger.release_next_tranche().unwrap();
        prop_assert_eq!(extra, ReleaseOutcome::NothingToRelease);
        prop_assert_eq!(ledger.paid_amount(), budget);
    }

    #[test]
    fn checkpoint_round_trip_at_any_point(duration in 1_u32..400, releases in 0_usize..15) {
        let project = Project::new("Prop".to_string(), duration, 123_457, start());
        let mut ledger = TreasuryLedger::new(project).unwrap();
        for _ in 0..releases {
            ledger.release_next_tranche().unwrap();
        }

        let restored = TreasuryLedger::load_checkpoint(&ledger.save_checkpoint().unwrap()).unwrap();
        prop_assert_eq!(restored, ledger);
    }
}
