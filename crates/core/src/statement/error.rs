//! Statement error types.

use thiserror::Error;

/// Movements whose balances leave the decimal range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Applying a movement overflows the running balance.
    #[error("movements[{movement}] overflows the running balance")]
    Overflow {
        /// Index of the offending movement.
        movement: usize,
    },

    /// The increase, decrease, or net change totals overflow.
    #[error("statement totals overflow the decimal range")]
    TotalsOverflow,
}
