//! Property-based tests for the pay stub calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use abacus_shared::types::round_money;

use super::calculator::PayrollCalculator;
use super::types::{CompensationBasis, DeductionRule, EmploymentClass};

fn money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0i64..max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn class_strategy() -> impl Strategy<Value = EmploymentClass> {
    prop_oneof![
        Just(EmploymentClass::Hourly),
        Just(EmploymentClass::FixedSalary),
        Just(EmploymentClass::Contractor),
    ]
}

fn basis_strategy() -> impl Strategy<Value = CompensationBasis> {
    (class_strategy(), money(1_000_000)).prop_map(|(employment_class, rate)| CompensationBasis {
        employment_class,
        rate,
        hours: None,
    })
}

/// Percentages up to 150% and fixed amounts up to 5,000.00, so deductions
/// regularly exceed gross pay.
fn rule_strategy() -> impl Strategy<Value = DeductionRule> {
    let classes = || prop::collection::btree_set(class_strategy(), 0..=3);
    prop_oneof![
        ((0i64..15_000).prop_map(|bp| Decimal::new(bp, 2)), classes())
            .prop_map(|(value, applies)| DeductionRule::percentage("pct", value, applies)),
        (money(500_000), classes())
            .prop_map(|(value, applies)| DeductionRule::fixed("flat", value, applies)),
    ]
}

fn hours_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((0i64..8_000).prop_map(|h| Decimal::new(h, 1)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Net pay is never negative, whatever the deductions.
    #[test]
    fn prop_net_pay_never_negative(
        basis in basis_strategy(),
        hours in hours_strategy(),
        gross in prop::option::of(money(1_000_000)),
        rules in prop::collection::vec(rule_strategy(), 0..8),
    ) {
        let stub = PayrollCalculator::default()
            .compute_pay(&basis, hours, gross, &rules)
            .unwrap();

        prop_assert!(stub.net_pay >= Decimal::ZERO);
        prop_assert_eq!(
            stub.net_pay,
            (stub.gross_pay - stub.total_deductions).max(Decimal::ZERO)
        );
    }

    /// The total is the sum of the itemized amounts.
    #[test]
    fn prop_total_is_sum_of_items(
        basis in basis_strategy(),
        rules in prop::collection::vec(rule_strategy(), 0..8),
    ) {
        let stub = PayrollCalculator::default()
            .compute_pay(&basis, None, None, &rules)
            .unwrap();

        let sum: Decimal = stub.deductions.iter().map(|d| d.amount).sum();
        prop_assert_eq!(stub.total_deductions, sum);
    }

    /// Contractors carry at most the single default withholding line.
    #[test]
    fn prop_contractor_single_withholding(
        rate in money(1_000_000),
        gross in prop::option::of(money(1_000_000)),
    ) {
        let basis = CompensationBasis::contractor(rate);
        let stub = PayrollCalculator::default()
            .compute_pay(&basis, None, gross, &[])
            .unwrap();

        prop_assert!(stub.deductions.len() <= 1);
        let expected = round_money((stub.gross_pay - dec!(500)).max(Decimal::ZERO) * dec!(0.10));
        prop_assert_eq!(stub.total_deductions, expected);
    }

    /// Salaried pay never depends on hours.
    #[test]
    fn prop_salary_ignores_hours(
        rate in money(1_000_000),
        hours in hours_strategy(),
    ) {
        let calculator = PayrollCalculator::default();
        let basis = CompensationBasis::salary(rate);

        let with_hours = calculator.compute_pay(&basis, hours, None, &[]).unwrap();
        let without = calculator.compute_pay(&basis, None, None, &[]).unwrap();

        prop_assert_eq!(with_hours, without);
    }
}
