//! Tax calculation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed input rejected by the tax calculator.
///
/// Ambiguous configuration (a rate without a name) is not an error; such
/// rules are skipped so the calculator stays usable while a form is half
/// filled in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// A line has a negative quantity.
    #[error("lines[{line}].quantity must not be negative, got {quantity}")]
    NegativeQuantity {
        /// Index of the offending line.
        line: usize,
        /// The rejected quantity.
        quantity: Decimal,
    },

    /// A tax rule has a negative rate.
    #[error("rules[{rule}].rate must not be negative, got {rate} for tax '{name}'")]
    NegativeRate {
        /// Index of the offending rule.
        rule: usize,
        /// Name of the offending rule.
        name: String,
        /// The rejected rate.
        rate: Decimal,
    },

    /// A line's subtotal or tax does not fit in a decimal.
    #[error("lines[{line}] overflows the decimal range")]
    Overflow {
        /// Index of the offending line.
        line: usize,
    },

    /// The document totals do not fit in a decimal.
    #[error("document total overflows the decimal range")]
    TotalOverflow,
}

impl TaxError {
    /// Returns the path of the offending input field, e.g. `lines[2].quantity`.
    #[must_use]
    pub fn field(&self) -> String {
        match self {
            Self::NegativeQuantity { line, .. } => format!("lines[{line}].quantity"),
            Self::NegativeRate { rule, .. } => format!("rules[{rule}].rate"),
            Self::Overflow { line } => format!("lines[{line}]"),
            Self::TotalOverflow => "grand_total".to_string(),
        }
    }
}
