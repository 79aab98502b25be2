//! Document tax calculator.

use std::collections::HashMap;

use abacus_shared::types::round_money;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::TaxError;
use super::types::{LineItem, LineTotals, TaxBreakdown, TaxRule, TaxSummary};

/// Computes subtotal, per-tax breakdown, and grand total for a document.
///
/// Stateless: the same inputs always produce the same summary.
pub struct TaxCalculator;

/// Running accrual for one tax name, kept unrounded until the end.
struct Accrual<'a> {
    name: &'a str,
    rate: Decimal,
    amount: Decimal,
}

impl TaxCalculator {
    /// Computes the taxes of a document.
    ///
    /// For every line and every active rule the line opts into,
    /// `line_subtotal × rate` is accrued under the rule's name. Each
    /// breakdown amount is rounded once, and the grand total is the rounded
    /// subtotal plus the rounded breakdown amounts.
    ///
    /// # Errors
    ///
    /// Returns `TaxError` if a line quantity or a rule rate is negative, or
    /// if a line or document amount overflows the decimal range.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use abacus_core::tax::{LineItem, TaxCalculator, TaxRule};
    ///
    /// let vat = TaxRule::new("VAT", dec!(0.10));
    /// let lines = vec![LineItem::new(dec!(2), dec!(100)).taxed_by(vat.id)];
    ///
    /// let summary = TaxCalculator::compute(&lines, &[vat]).unwrap();
    /// assert_eq!(summary.subtotal, dec!(200.00));
    /// assert_eq!(summary.breakdown[0].amount, dec!(20.00));
    /// assert_eq!(summary.grand_total, dec!(220.00));
    /// ```
    pub fn compute(lines: &[LineItem], rules: &[TaxRule]) -> Result<TaxSummary, TaxError> {
        Self::validate(lines, rules)?;

        let line_subtotals = lines
            .iter()
            .enumerate()
            .map(|(line, item)| item.line_subtotal().ok_or(TaxError::Overflow { line }))
            .collect::<Result<Vec<Decimal>, TaxError>>()?;
        let mut line_taxes = vec![Decimal::ZERO; lines.len()];

        let mut accruals: Vec<Accrual<'_>> = Vec::new();
        let mut by_name: HashMap<&str, usize> = HashMap::new();

        for rule in rules.iter().filter(|r| r.is_active()) {
            for (idx, line) in lines.iter().enumerate() {
                if !line.is_taxed_by(rule.id) {
                    continue;
                }

                let overflow = TaxError::Overflow { line: idx };
                let tax = line_subtotals[idx]
                    .checked_mul(rule.rate)
                    .ok_or_else(|| overflow.clone())?;
                line_taxes[idx] = line_taxes[idx]
                    .checked_add(tax)
                    .ok_or_else(|| overflow.clone())?;

                let slot = *by_name.entry(rule.display_name()).or_insert_with(|| {
                    accruals.push(Accrual {
                        name: rule.display_name(),
                        rate: rule.rate,
                        amount: Decimal::ZERO,
                    });
                    accruals.len() - 1
                });
                accruals[slot].amount = accruals[slot].amount.checked_add(tax).ok_or(overflow)?;
            }
        }

        let exact_subtotal = checked_sum(line_subtotals.iter().copied())?;
        let exact_tax = checked_sum(accruals.iter().map(|a| a.amount))?;

        let breakdown: Vec<TaxBreakdown> = accruals
            .into_iter()
            .map(|a| TaxBreakdown {
                tax_name: a.name.to_string(),
                rate: a.rate,
                amount: round_money(a.amount),
            })
            .collect();

        let subtotal = round_money(exact_subtotal);
        let tax_total = checked_sum(breakdown.iter().map(|b| b.amount))?;
        let grand_total = round_money(
            subtotal
                .checked_add(tax_total)
                .ok_or(TaxError::TotalOverflow)?,
        );
        let unrounded_grand_total = exact_subtotal
            .checked_add(exact_tax)
            .ok_or(TaxError::TotalOverflow)?;

        let line_totals = line_subtotals
            .into_iter()
            .zip(line_taxes)
            .map(|(line_subtotal, tax_amount)| LineTotals {
                line_subtotal: round_money(line_subtotal),
                tax_amount: round_money(tax_amount),
            })
            .collect();

        debug!(
            lines = lines.len(),
            taxes = breakdown.len(),
            %subtotal,
            %grand_total,
            "Computed document taxes"
        );

        Ok(TaxSummary {
            subtotal,
            breakdown,
            grand_total,
            lines: line_totals,
            unrounded_grand_total,
        })
    }

    /// Fails on the first malformed field, rules before lines.
    fn validate(lines: &[LineItem], rules: &[TaxRule]) -> Result<(), TaxError> {
        if let Some((rule, r)) = rules
            .iter()
            .enumerate()
            .find(|(_, r)| r.rate.is_sign_negative() && !r.rate.is_zero())
        {
            return Err(TaxError::NegativeRate {
                rule,
                name: r.name.clone(),
                rate: r.rate,
            });
        }

        if let Some((line, l)) = lines
            .iter()
            .enumerate()
            .find(|(_, l)| l.quantity.is_sign_negative() && !l.quantity.is_zero())
        {
            return Err(TaxError::NegativeQuantity {
                line,
                quantity: l.quantity,
            });
        }

        Ok(())
    }
}

/// Sums document amounts, failing instead of panicking on overflow.
fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, TaxError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(TaxError::TotalOverflow)
}
