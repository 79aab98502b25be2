//! JSON request and response bodies of the command line front end.

use abacus_core::journal::{JournalBalance, JournalLine};
use abacus_core::payroll::{PayRequest, PayRunResult, PayStub};
use abacus_core::statement::{LedgerMovement, Statement, StatementTotals};
use abacus_core::tax::{LineItem, TaxRule};
use abacus_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input of the `tax` command.
#[derive(Debug, Deserialize)]
pub struct TaxRequest {
    /// Configured tax rules, in declaration order.
    #[serde(default)]
    pub rules: Vec<TaxRule>,
    /// Document lines.
    pub lines: Vec<LineItem>,
}

/// Input of the `journal` command.
#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    /// Lines of the manual entry.
    pub lines: Vec<JournalLine>,
}

/// Output of the `journal` command.
#[derive(Debug, Serialize)]
pub struct JournalResponse {
    /// Balance state and the two totals.
    #[serde(flatten)]
    pub balance: JournalBalance,
    /// `total_debits - total_credits`.
    pub difference: Decimal,
}

impl From<JournalBalance> for JournalResponse {
    fn from(balance: JournalBalance) -> Self {
        Self {
            difference: balance.difference(),
            balance,
        }
    }
}

/// Input of the `statement` command.
#[derive(Debug, Deserialize)]
pub struct StatementRequest {
    /// Balance before the first movement.
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Movements, already in display order.
    #[serde(default)]
    pub movements: Vec<LedgerMovement>,
}

/// Output of the `statement` command.
#[derive(Debug, Serialize)]
pub struct StatementResponse<'a> {
    /// Rows with running balances.
    #[serde(flatten)]
    pub statement: Statement<'a>,
    /// Footer totals.
    pub totals: StatementTotals,
    /// False when the movements were not sorted by time.
    pub chronological: bool,
}

/// Input of the `pay-run` command.
#[derive(Debug, Deserialize)]
pub struct PayRunRequest {
    /// One request per employee or contractor.
    pub requests: Vec<PayRequest>,
}

/// One entry of the `pay-run` output.
///
/// Exactly one of `stub` and `error` is present.
#[derive(Debug, Serialize)]
pub struct PayRunItem {
    /// Employee the stub belongs to, when the request named one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// The computed stub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub: Option<PayStub>,
    /// Why the request was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<PayRunResult> for PayRunItem {
    fn from(result: PayRunResult) -> Self {
        let (stub, error) = match result.stub {
            Ok(stub) => (Some(stub), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            employee_id: result.employee_id,
            stub,
            error,
        }
    }
}
