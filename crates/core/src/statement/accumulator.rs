//! Running balance accumulation.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::StatementError;
use super::types::{LedgerMovement, Statement, StatementRow, StatementTotals};

/// Applies ordered movements to an opening balance.
pub struct BalanceAccumulator;

impl BalanceAccumulator {
    /// Produces one row per movement with the balance after it.
    ///
    /// Movements are applied in the order given; ordering, including how
    /// same-timestamp movements tie-break, is the caller's job. Amounts are
    /// added exactly, so `closing_balance == opening_balance + Σ signed_amount`.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::Overflow` naming the first movement that
    /// pushes the running balance out of the decimal range, and
    /// `StatementError::TotalsOverflow` if the footer totals do.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use abacus_core::statement::{BalanceAccumulator, LedgerMovement};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let movements = vec![
    ///     LedgerMovement::invoice_charge(day, dec!(500), "INV-7"),
    ///     LedgerMovement::client_payment(day, dec!(200), "Cheque 114"),
    /// ];
    ///
    /// let statement = BalanceAccumulator::accumulate(dec!(100), &movements).unwrap();
    /// assert_eq!(statement.rows[0].running_balance, dec!(600));
    /// assert_eq!(statement.closing_balance, dec!(400));
    /// ```
    pub fn accumulate(
        opening_balance: Decimal,
        movements: &[LedgerMovement],
    ) -> Result<Statement<'_>, StatementError> {
        if !is_chronological(movements) {
            debug!(
                movements = movements.len(),
                "Movements are not in chronological order; keeping caller order"
            );
        }

        let mut running = opening_balance;
        let mut total_increases = Decimal::ZERO;
        let mut total_decreases = Decimal::ZERO;
        let mut rows = Vec::with_capacity(movements.len());

        for (idx, movement) in movements.iter().enumerate() {
            let amount = movement.signed_amount;
            running = running
                .checked_add(amount)
                .ok_or(StatementError::Overflow { movement: idx })?;

            if amount.is_sign_negative() {
                total_decreases = total_decreases
                    .checked_sub(amount)
                    .ok_or(StatementError::TotalsOverflow)?;
            } else {
                total_increases = total_increases
                    .checked_add(amount)
                    .ok_or(StatementError::TotalsOverflow)?;
            }

            rows.push(StatementRow {
                movement,
                running_balance: running,
            });
        }

        let net_change = running
            .checked_sub(opening_balance)
            .ok_or(StatementError::TotalsOverflow)?;

        debug!(
            movements = movements.len(),
            %opening_balance,
            closing_balance = %running,
            "Accumulated running balance"
        );

        Ok(Statement {
            opening_balance,
            rows,
            closing_balance: running,
            totals: StatementTotals {
                total_increases,
                total_decreases,
                net_change,
            },
        })
    }
}

/// Returns true if movement timestamps never decrease.
#[must_use]
pub fn is_chronological(movements: &[LedgerMovement]) -> bool {
    movements
        .windows(2)
        .all(|pair| pair[0].occurred_at <= pair[1].occurred_at)
}
