//! Balance validation for manual journal entries.

use abacus_shared::types::round_money;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::JournalError;
use super::types::{EntryType, JournalBalance, JournalLine};

/// Minimum number of lines in a postable entry.
pub const MIN_LINES: usize = 2;

/// Validates manual journal entries.
pub struct JournalValidator;

impl JournalValidator {
    /// Computes the totals of an entry and whether it is balanced.
    ///
    /// Totals are summed at full precision and rounded to currency precision
    /// before comparison, so values differing only past the second decimal
    /// compare equal. An entry is balanced when it has at least 2 lines and
    /// its totals are equal and greater than zero.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::NegativeAmount` for a line with a negative
    /// amount. An unbalanced entry is not an error.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use abacus_core::journal::{JournalLine, JournalValidator};
    /// use abacus_shared::types::AccountId;
    ///
    /// let lines = vec![
    ///     JournalLine::debit(AccountId::new(), dec!(150.00)),
    ///     JournalLine::credit(AccountId::new(), dec!(100.00)),
    ///     JournalLine::credit(AccountId::new(), dec!(50.00)),
    /// ];
    /// let balance = JournalValidator::validate(&lines).unwrap();
    /// assert!(balance.is_balanced);
    /// ```
    pub fn validate(lines: &[JournalLine]) -> Result<JournalBalance, JournalError> {
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;

        for (idx, line) in lines.iter().enumerate() {
            if line.amount < Decimal::ZERO {
                return Err(JournalError::NegativeAmount {
                    line: idx,
                    amount: line.amount,
                });
            }

            match line.side {
                EntryType::Debit => total_debits += line.amount,
                EntryType::Credit => total_credits += line.amount,
            }
        }

        let total_debits = round_money(total_debits);
        let total_credits = round_money(total_credits);
        let is_balanced = lines.len() >= MIN_LINES
            && total_debits == total_credits
            && total_debits > Decimal::ZERO;

        debug!(
            lines = lines.len(),
            %total_debits,
            %total_credits,
            is_balanced,
            "Validated journal entry"
        );

        Ok(JournalBalance {
            is_balanced,
            total_debits,
            total_credits,
        })
    }

    /// Checks that an entry may be posted.
    ///
    /// Callers persist an entry only after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` naming the first rule the entry fails:
    /// malformed amounts, fewer than 2 lines, a zero-amount line, a zero
    /// total, or unequal totals.
    pub fn ensure_postable(lines: &[JournalLine]) -> Result<JournalBalance, JournalError> {
        let balance = Self::validate(lines)?;

        if lines.len() < MIN_LINES {
            return Err(JournalError::InsufficientLines { count: lines.len() });
        }

        if let Some(idx) = lines.iter().position(|l| l.amount.is_zero()) {
            return Err(JournalError::ZeroAmount { line: idx });
        }

        if balance.total_debits.is_zero() && balance.total_credits.is_zero() {
            return Err(JournalError::ZeroTotal);
        }

        if !balance.is_balanced {
            return Err(JournalError::Unbalanced {
                debits: balance.total_debits,
                credits: balance.total_credits,
            });
        }

        Ok(balance)
    }
}
