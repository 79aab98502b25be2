//! Journal validation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when validating or posting a journal entry.
///
/// An unbalanced entry is only an error when the caller asks to post it;
/// [`super::JournalValidator::validate`] reports it as `is_balanced = false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    // ========== Malformed input ==========
    /// A line has a negative amount.
    #[error("lines[{line}].amount must not be negative, got {amount}")]
    NegativeAmount {
        /// Index of the offending line.
        line: usize,
        /// The rejected amount.
        amount: Decimal,
    },

    // ========== Posting gate ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// A line has a zero amount.
    #[error("lines[{line}].amount must be greater than zero")]
    ZeroAmount {
        /// Index of the offending line.
        line: usize,
    },

    /// Entry totals are zero.
    #[error("Journal entry total must be greater than zero")]
    ZeroTotal,

    /// Debits and credits differ.
    #[error("Journal entry is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },
}

impl JournalError {
    /// Returns true if the error is malformed input rather than a rule the
    /// entry fails.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::NegativeAmount { .. })
    }
}
