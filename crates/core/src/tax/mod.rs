//! Per-line multi-tax computation for sales documents.
//!
//! Each line opts into any number of configured tax rules. Tax is accrued
//! per line at full precision and grouped by tax name, so two rules that
//! share a name (for example the same levy configured on two product types)
//! produce a single breakdown row.

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::TaxCalculator;
pub use error::TaxError;
pub use types::{LEGACY_SLOT_COUNT, LineItem, LineTotals, TaxBreakdown, TaxRule, TaxSummary};
