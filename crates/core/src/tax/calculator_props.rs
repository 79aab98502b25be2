//! Property-based tests for the document tax calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use abacus_shared::types::round_money;

use super::calculator::TaxCalculator;
use super::types::{LEGACY_SLOT_COUNT, LineItem, TaxRule};

/// Strategy for a unit price in cents, credits included.
fn unit_price() -> impl Strategy<Value = Decimal> {
    (-50_000i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a whole quantity.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..50).prop_map(Decimal::from)
}

fn line() -> impl Strategy<Value = LineItem> {
    (quantity(), unit_price(), prop::array::uniform4(any::<bool>()))
        .prop_map(|(q, p, flags)| LineItem::with_slots(q, p, flags))
}

fn lines(max: usize) -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line(), 0..=max)
}

/// Two named slots with four-digit rates; slots 3-4 left unconfigured.
fn rules() -> Vec<TaxRule> {
    vec![
        TaxRule::slot(1, "GST", dec!(0.0500)),
        TaxRule::slot(2, "PST", dec!(0.0825)),
        TaxRule::slot(3, "", dec!(0.1000)),
        TaxRule::slot(4, "Unused", dec!(0)),
    ]
}

/// All four slots configured with distinct names.
fn four_named_rules() -> Vec<TaxRule> {
    vec![
        TaxRule::slot(1, "GST", dec!(0.0500)),
        TaxRule::slot(2, "PST", dec!(0.0825)),
        TaxRule::slot(3, "HST", dec!(0.1300)),
        TaxRule::slot(4, "Levy", dec!(0.0175)),
    ]
}

/// Largest whole-vs-split grand total gap for `names` active tax names.
///
/// Line subtotals are whole cents, so only the per-name rounding of the
/// whole document (at most half a cent each) and the rounding of the
/// recombined exact total (another half cent) contribute.
fn split_tolerance(names: usize) -> Decimal {
    round_money(dec!(0.005) * Decimal::from(names + 1) - dec!(0.001))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Splitting a document in two and summing the exact totals reconciles
    /// with the whole document to within one cent.
    #[test]
    fn prop_split_documents_reconcile(a in lines(10), b in lines(10)) {
        let rules = rules();
        let whole: Vec<LineItem> = a.iter().chain(b.iter()).cloned().collect();

        let whole = TaxCalculator::compute(&whole, &rules).unwrap();
        let part_a = TaxCalculator::compute(&a, &rules).unwrap();
        let part_b = TaxCalculator::compute(&b, &rules).unwrap();

        let recombined =
            round_money(part_a.unrounded_grand_total() + part_b.unrounded_grand_total());
        prop_assert!(
            (whole.grand_total - recombined).abs() <= split_tolerance(2),
            "whole {} vs recombined {}",
            whole.grand_total,
            recombined
        );
    }

    /// With every slot named, the gap grows with the number of rounded rows.
    #[test]
    fn prop_split_documents_reconcile_four_names(a in lines(10), b in lines(10)) {
        let rules = four_named_rules();
        let whole: Vec<LineItem> = a.iter().chain(b.iter()).cloned().collect();

        let whole = TaxCalculator::compute(&whole, &rules).unwrap();
        let part_a = TaxCalculator::compute(&a, &rules).unwrap();
        let part_b = TaxCalculator::compute(&b, &rules).unwrap();

        let recombined =
            round_money(part_a.unrounded_grand_total() + part_b.unrounded_grand_total());
        prop_assert!(whole.breakdown.len() <= 4);
        prop_assert!(
            (whole.grand_total - recombined).abs() <= split_tolerance(4),
            "whole {} vs recombined {}",
            whole.grand_total,
            recombined
        );
    }

    /// The grand total is always the rounded subtotal plus the rounded taxes.
    #[test]
    fn prop_grand_total_is_subtotal_plus_taxes(lines in lines(20)) {
        let summary = TaxCalculator::compute(&lines, &rules()).unwrap();
        prop_assert_eq!(summary.grand_total, summary.subtotal + summary.total_tax());
    }

    /// Unconfigured slots never appear in the breakdown.
    #[test]
    fn prop_inactive_rules_never_reported(lines in lines(20)) {
        let summary = TaxCalculator::compute(&lines, &rules()).unwrap();
        prop_assert!(summary.breakdown.len() <= 2);
        prop_assert!(summary.breakdown.iter().all(|b| b.tax_name == "GST" || b.tax_name == "PST"));
    }

    /// Reordering lines does not change any total.
    #[test]
    fn prop_line_order_irrelevant(lines in lines(15)) {
        let rules = rules();
        let mut reversed = lines.clone();
        reversed.reverse();

        let forward = TaxCalculator::compute(&lines, &rules).unwrap();
        let backward = TaxCalculator::compute(&reversed, &rules).unwrap();

        prop_assert_eq!(forward.subtotal, backward.subtotal);
        prop_assert_eq!(forward.breakdown, backward.breakdown);
        prop_assert_eq!(forward.grand_total, backward.grand_total);
    }

    /// Untaxed documents total exactly their subtotal.
    #[test]
    fn prop_untaxed_document_total_is_subtotal(
        prices in prop::collection::vec((quantity(), unit_price()), 0..20),
    ) {
        let lines: Vec<LineItem> = prices
            .into_iter()
            .map(|(q, p)| LineItem::with_slots(q, p, [false; LEGACY_SLOT_COUNT]))
            .collect();

        let summary = TaxCalculator::compute(&lines, &rules()).unwrap();
        prop_assert!(summary.breakdown.is_empty());
        prop_assert_eq!(summary.grand_total, summary.subtotal);
    }
}
