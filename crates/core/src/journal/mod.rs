//! Double-entry balance validation for manual journal entries.
//!
//! This module provides:
//! - Journal line types (debits and credits)
//! - A balance predicate with the two totals for display
//! - A posting gate that turns an unbalanced entry into an error

pub mod error;
pub mod types;
pub mod validator;

#[cfg(test)]
mod validator_props;

pub use error::JournalError;
pub use types::{EntryType, JournalBalance, JournalLine};
pub use validator::JournalValidator;
