//! Property-based tests for running balance accumulation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::accumulator::BalanceAccumulator;
use super::types::{LedgerMovement, MovementType};

/// Strategy for generating balance changes (can be positive or negative)
fn balance_change_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn opening_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date")
}

fn movements(changes: &[Decimal]) -> Vec<LedgerMovement> {
    changes
        .iter()
        .zip(0i64..)
        .map(|(amount, day)| {
            LedgerMovement::new(
                start() + Duration::days(day),
                *amount,
                format!("movement {day}"),
                MovementType::Adjustment,
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The closing balance equals the opening balance plus every movement.
    #[test]
    fn prop_closing_equals_opening_plus_sum(
        opening in opening_strategy(),
        changes in prop::collection::vec(balance_change_strategy(), 0..40),
    ) {
        let movements = movements(&changes);
        let statement = BalanceAccumulator::accumulate(opening, &movements).unwrap();

        let expected = opening + changes.iter().copied().sum::<Decimal>();
        prop_assert_eq!(statement.closing_balance, expected);
    }

    /// Each row is the previous row plus its own movement.
    #[test]
    fn prop_row_recurrence(
        opening in opening_strategy(),
        changes in prop::collection::vec(balance_change_strategy(), 1..40),
    ) {
        let movements = movements(&changes);
        let statement = BalanceAccumulator::accumulate(opening, &movements).unwrap();

        prop_assert_eq!(statement.rows.len(), movements.len());
        prop_assert_eq!(
            statement.rows[0].running_balance,
            opening + movements[0].signed_amount
        );
        for i in 1..statement.rows.len() {
            prop_assert_eq!(
                statement.rows[i].running_balance,
                statement.rows[i - 1].running_balance + movements[i].signed_amount
            );
        }
        prop_assert_eq!(
            statement.closing_balance,
            statement.rows[statement.rows.len() - 1].running_balance
        );
    }

    /// Footer totals reconcile with the opening and closing balances.
    #[test]
    fn prop_totals_reconcile(
        opening in opening_strategy(),
        changes in prop::collection::vec(balance_change_strategy(), 0..40),
    ) {
        let movements = movements(&changes);
        let statement = BalanceAccumulator::accumulate(opening, &movements).unwrap();
        let totals = statement.totals();

        prop_assert!(totals.total_increases >= Decimal::ZERO);
        prop_assert!(totals.total_decreases >= Decimal::ZERO);
        prop_assert_eq!(
            statement.closing_balance,
            opening + totals.total_increases - totals.total_decreases
        );
    }

    /// Applying the same movements twice gives the same statement.
    #[test]
    fn prop_accumulation_deterministic(
        opening in opening_strategy(),
        changes in prop::collection::vec(balance_change_strategy(), 0..20),
    ) {
        let movements = movements(&changes);
        let first = BalanceAccumulator::accumulate(opening, &movements).unwrap();
        let second = BalanceAccumulator::accumulate(opening, &movements).unwrap();

        prop_assert_eq!(first, second);
    }
}
