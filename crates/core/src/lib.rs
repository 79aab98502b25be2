//! Financial calculation engine for Abacus.
//!
//! This crate contains pure calculations with ZERO I/O dependencies.
//! Every operation is a synchronous function of its inputs; no component
//! holds state between calls, so all of them are safe to call on every edit.
//!
//! # Modules
//!
//! - `tax` - Per-line multi-tax computation for sales documents
//! - `journal` - Double-entry balance validation for manual journal entries
//! - `statement` - Running balances for statements, ledgers, and bank views
//! - `payroll` - Gross-to-net pay with itemized deductions
//! - `error` - Conversion of engine errors into application errors

pub mod error;
pub mod journal;
pub mod payroll;
pub mod statement;
pub mod tax;
