//! Statement domain types.

use abacus_shared::types::MovementId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normal balance side of the account a ledger view is built for.
///
/// - Asset/Expense: balance += debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance += credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    CreditNormal,
}

impl SignConvention {
    /// Calculates the balance change for a posting.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// What produced a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Invoice charged to a client.
    Invoice,
    /// Payment received or made.
    Payment,
    /// Bank deposit.
    BankDeposit,
    /// Bank withdrawal.
    BankWithdrawal,
    /// Posting from a journal entry.
    JournalPosting,
    /// Manual adjustment.
    Adjustment,
    /// Anything else, labelled by the caller.
    Other(String),
}

/// A signed change to a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMovement {
    /// Caller's identifier of the movement, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovementId>,
    /// When the movement happened.
    pub occurred_at: NaiveDateTime,
    /// Positive increases the balance, negative decreases it.
    pub signed_amount: Decimal,
    /// Text shown on the statement row.
    pub description: String,
    /// What produced the movement.
    pub movement_type: MovementType,
}

impl LedgerMovement {
    /// Creates a movement with an already-signed amount.
    #[must_use]
    pub fn new(
        occurred_at: NaiveDateTime,
        signed_amount: Decimal,
        description: impl Into<String>,
        movement_type: MovementType,
    ) -> Self {
        Self {
            id: None,
            occurred_at,
            signed_amount,
            description: description.into(),
            movement_type,
        }
    }

    /// Creates a movement from a journal posting on one account.
    ///
    /// The sign comes from the account's normal balance side, which only
    /// the caller knows.
    #[must_use]
    pub fn from_posting(
        occurred_at: NaiveDateTime,
        debit: Decimal,
        credit: Decimal,
        convention: SignConvention,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            occurred_at,
            convention.balance_change(debit, credit),
            description,
            MovementType::JournalPosting,
        )
    }

    /// Creates a client statement charge, which increases what the client owes.
    #[must_use]
    pub fn invoice_charge(
        occurred_at: NaiveDateTime,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(occurred_at, amount, description, MovementType::Invoice)
    }

    /// Creates a client statement payment, which decreases what the client owes.
    #[must_use]
    pub fn client_payment(
        occurred_at: NaiveDateTime,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(occurred_at, -amount, description, MovementType::Payment)
    }

    /// Attaches the caller's identifier.
    #[must_use]
    pub fn with_id(mut self, id: MovementId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true if the movement increases the balance.
    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.signed_amount > Decimal::ZERO
    }
}

/// A movement with the balance after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow<'a> {
    /// The movement, borrowed from the caller's list.
    pub movement: &'a LedgerMovement,
    /// Balance after this movement.
    pub running_balance: Decimal,
}

/// Rows and closing balance of a statement or ledger view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement<'a> {
    /// Balance before the first movement.
    pub opening_balance: Decimal,
    /// One row per movement, in input order.
    pub rows: Vec<StatementRow<'a>>,
    /// Balance after the last movement.
    pub closing_balance: Decimal,
    /// Footer totals, summed during accumulation.
    #[serde(skip)]
    pub(crate) totals: StatementTotals,
}

/// Aggregate movement totals of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementTotals {
    /// Sum of positive movements.
    pub total_increases: Decimal,
    /// Sum of negative movements, as a positive number.
    pub total_decreases: Decimal,
    /// `closing_balance - opening_balance`.
    pub net_change: Decimal,
}

impl Statement<'_> {
    /// Returns increase/decrease totals for the statement footer.
    #[must_use]
    pub fn totals(&self) -> StatementTotals {
        self.totals
    }

    /// Returns true if the statement has no movements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
