//! Request handlers behind the `abacus` command.
//!
//! Each handler parses one JSON request, runs the matching engine
//! computation, and returns the result as a JSON value. The binary only
//! deals with arguments, files, and logging.

pub mod requests;

use abacus_core::journal::JournalValidator;
use abacus_core::payroll::{PayRequest, PayrollCalculator};
use abacus_core::statement::{BalanceAccumulator, is_chronological};
use abacus_core::tax::TaxCalculator;
use abacus_shared::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use requests::{
    JournalRequest, JournalResponse, PayRunItem, PayRunRequest, StatementRequest,
    StatementResponse, TaxRequest,
};

/// A computation the command line can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Per-line tax breakdown of a sales document.
    Tax,
    /// Balance check of a manual journal entry.
    Journal {
        /// Refuse entries that could not be posted.
        require_balanced: bool,
    },
    /// Running balances over ordered movements.
    Statement,
    /// One pay stub.
    Payroll,
    /// Pay stubs for a batch of requests.
    PayRun,
}

impl Operation {
    /// Returns the command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tax => "tax",
            Self::Journal { .. } => "journal",
            Self::Statement => "statement",
            Self::Payroll => "payroll",
            Self::PayRun => "pay-run",
        }
    }
}

/// Runs `operation` on a JSON request.
///
/// # Errors
///
/// Returns `AppError::Validation` if the request is not valid JSON for the
/// operation or the engine rejects a field, and `AppError::BusinessRule` if
/// a journal entry is refused under `require_balanced`.
pub fn run(operation: Operation, input: &str, payroll: &PayrollCalculator) -> AppResult<Value> {
    let output = match operation {
        Operation::Tax => tax(input)?,
        Operation::Journal { require_balanced } => journal(input, require_balanced)?,
        Operation::Statement => statement(input)?,
        Operation::Payroll => pay(input, payroll)?,
        Operation::PayRun => pay_run(input, payroll)?,
    };
    info!(operation = operation.name(), "Request computed");
    Ok(output)
}

/// Computes the tax summary of a document.
///
/// # Errors
///
/// Returns `AppError::Validation` on malformed input.
pub fn tax(input: &str) -> AppResult<Value> {
    let request: TaxRequest = parse(input, "tax")?;
    let summary = TaxCalculator::compute(&request.lines, &request.rules)?;
    to_value(&summary)
}

/// Checks whether a journal entry balances.
///
/// # Errors
///
/// Returns `AppError::Validation` on malformed input, and
/// `AppError::BusinessRule` when `require_balanced` is set and the entry
/// cannot be posted.
pub fn journal(input: &str, require_balanced: bool) -> AppResult<Value> {
    let request: JournalRequest = parse(input, "journal")?;
    let balance = if require_balanced {
        JournalValidator::ensure_postable(&request.lines)?
    } else {
        JournalValidator::validate(&request.lines)?
    };
    to_value(&JournalResponse::from(balance))
}

/// Builds a statement with running balances.
///
/// # Errors
///
/// Returns `AppError::Validation` on malformed input or when a balance
/// overflows.
pub fn statement(input: &str) -> AppResult<Value> {
    let request: StatementRequest = parse(input, "statement")?;
    let statement = BalanceAccumulator::accumulate(request.opening_balance, &request.movements)?;
    let response = StatementResponse {
        totals: statement.totals(),
        chronological: is_chronological(&request.movements),
        statement,
    };
    to_value(&response)
}

/// Computes one pay stub.
///
/// # Errors
///
/// Returns `AppError::Validation` on malformed input.
pub fn pay(input: &str, calculator: &PayrollCalculator) -> AppResult<Value> {
    let request: PayRequest = parse(input, "payroll")?;
    let stub = calculator.compute(&request)?;
    to_value(&stub)
}

/// Computes pay stubs for a batch.
///
/// A rejected request does not stop the batch; its entry carries the error.
///
/// # Errors
///
/// Returns `AppError::Validation` if the batch itself is malformed.
pub fn pay_run(input: &str, calculator: &PayrollCalculator) -> AppResult<Value> {
    let request: PayRunRequest = parse(input, "pay-run")?;
    let items: Vec<PayRunItem> = calculator
        .compute_pay_run(&request.requests)
        .into_iter()
        .map(PayRunItem::from)
        .collect();
    to_value(&items)
}

fn parse<T: DeserializeOwned>(input: &str, command: &str) -> AppResult<T> {
    serde_json::from_str(input)
        .map_err(|e| AppError::Validation(format!("invalid {command} request: {e}")))
}

fn to_value<T: Serialize>(output: &T) -> AppResult<Value> {
    serde_json::to_value(output).map_err(|e| AppError::Internal(e.to_string()))
}
