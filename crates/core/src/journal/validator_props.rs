//! Property-based tests for journal balance validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use abacus_shared::types::AccountId;

use super::error::JournalError;
use super::types::{EntryType, JournalLine};
use super::validator::JournalValidator;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn opposite(side: EntryType) -> EntryType {
    match side {
        EntryType::Debit => EntryType::Credit,
        EntryType::Credit => EntryType::Debit,
    }
}

fn make_line(side: EntryType, amount: Decimal) -> JournalLine {
    JournalLine {
        account_id: AccountId::new(),
        side,
        amount,
        memo: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A debit split across any number of credits balances.
    #[test]
    fn prop_split_entry_balances(
        parts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let total: Decimal = parts.iter().copied().sum();
        let mut lines = vec![make_line(EntryType::Debit, total)];
        lines.extend(parts.iter().map(|p| make_line(EntryType::Credit, *p)));

        let balance = JournalValidator::validate(&lines).unwrap();
        prop_assert!(balance.is_balanced);
        prop_assert_eq!(balance.total_debits, total);
        prop_assert_eq!(balance.total_credits, total);
        prop_assert!(JournalValidator::ensure_postable(&lines).is_ok());
    }

    /// Nudging one side by a cent always unbalances the entry.
    #[test]
    fn prop_one_cent_off_unbalanced(
        side in entry_type_strategy(),
        amount in positive_amount(),
    ) {
        let lines = vec![
            make_line(side, amount + Decimal::new(1, 2)),
            make_line(opposite(side), amount),
        ];

        let balance = JournalValidator::validate(&lines).unwrap();
        prop_assert!(!balance.is_balanced);
        prop_assert_eq!(balance.difference().abs(), Decimal::new(1, 2));
        prop_assert!(
            matches!(
                JournalValidator::ensure_postable(&lines),
                Err(JournalError::Unbalanced { .. })
            ),
            "posting must be refused"
        );
    }

    /// Negative amounts are rejected as malformed input.
    #[test]
    fn prop_negative_amount_rejected(
        side in entry_type_strategy(),
        neg_amount in negative_amount(),
        other_amount in positive_amount(),
    ) {
        let lines = vec![
            make_line(opposite(side), other_amount),
            make_line(side, neg_amount),
        ];

        let result = JournalValidator::validate(&lines);
        prop_assert!(
            matches!(result, Err(JournalError::NegativeAmount { line: 1, .. })),
            "Negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// Single line entries are never balanced.
    #[test]
    fn prop_single_line_never_balanced(
        side in entry_type_strategy(),
        amount in positive_amount(),
    ) {
        let lines = vec![make_line(side, amount)];

        let balance = JournalValidator::validate(&lines).unwrap();
        prop_assert!(!balance.is_balanced);
    }

    /// Line order does not affect the result.
    #[test]
    fn prop_order_independent(
        debits in prop::collection::vec(positive_amount(), 1..5),
        credits in prop::collection::vec(positive_amount(), 1..5),
    ) {
        let mut lines: Vec<JournalLine> = debits
            .iter()
            .map(|a| make_line(EntryType::Debit, *a))
            .chain(credits.iter().map(|a| make_line(EntryType::Credit, *a)))
            .collect();

        let forward = JournalValidator::validate(&lines).unwrap();
        lines.reverse();
        let backward = JournalValidator::validate(&lines).unwrap();

        prop_assert_eq!(forward, backward);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Sub-cent lines round to a zero total and cannot be posted.
    #[test]
    fn test_sub_cent_entry_has_zero_total() {
        let lines = vec![
            make_line(EntryType::Debit, Decimal::new(1, 3)),
            make_line(EntryType::Credit, Decimal::new(1, 3)),
        ];

        let balance = JournalValidator::validate(&lines).unwrap();
        assert!(!balance.is_balanced);
        assert_eq!(
            JournalValidator::ensure_postable(&lines).unwrap_err(),
            JournalError::ZeroTotal
        );
    }
}
