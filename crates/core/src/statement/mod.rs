//! Running balances for client statements, account ledgers, and bank views.
//!
//! The accumulator applies already-ordered signed movements to an opening
//! balance. It never sorts and never decides signs: callers pick the sign
//! convention of their view (client payable balance, an account's normal
//! balance side, or the bank's own convention).

pub mod accumulator;
pub mod error;
pub mod types;

#[cfg(test)]
mod accumulator_props;

pub use accumulator::{BalanceAccumulator, is_chronological};
pub use error::StatementError;
pub use types::{
    LedgerMovement, MovementType, SignConvention, Statement, StatementRow, StatementTotals,
};
