//! Conversion of engine errors into application errors.
//!
//! Malformed input maps to `AppError::Validation`; an entry refused at the
//! posting gate maps to `AppError::BusinessRule`.

use abacus_shared::AppError;

use crate::journal::JournalError;
use crate::payroll::PayrollError;
use crate::statement::StatementError;
use crate::tax::TaxError;

impl From<TaxError> for AppError {
    fn from(err: TaxError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        if err.is_malformed_input() {
            Self::Validation(err.to_string())
        } else {
            Self::BusinessRule(err.to_string())
        }
    }
}

impl From<PayrollError> for AppError {
    fn from(err: PayrollError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StatementError> for AppError {
    fn from(err: StatementError) -> Self {
        Self::Validation(err.to_string())
    }
}
