//! Gross-to-net pay computation.
//!
//! Gross pay is derived from the employment class; deductions come from
//! caller-supplied percentage or fixed rules. Contractors get a single
//! withholding rule that only applies above a threshold. This is a generic
//! weighted-deduction engine: jurisdiction-specific rates are the caller's
//! configuration, not built in.

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::{PayrollCalculator, PayrollSettings};
pub use error::PayrollError;
pub use types::{
    CompensationBasis, Deduction, DeductionKind, DeductionRule, EmploymentClass, PayRequest,
    PayRunResult, PayStub,
};
