//! Payroll error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input rejected by the payroll calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// A field that must not be negative was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeValue {
        /// Path of the offending field, e.g. `hours_override` or `rules[1].value`.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A computed amount does not fit in a decimal.
    #[error("{field} overflows the decimal range")]
    Overflow {
        /// Amount that overflowed, e.g. `gross_pay` or `rules[0]`.
        field: String,
    },
}

impl PayrollError {
    /// Returns the path of the offending input field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::NegativeValue { field, .. } | Self::Overflow { field } => field,
        }
    }
}
