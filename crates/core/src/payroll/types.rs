//! Payroll domain types.

use std::collections::BTreeSet;

use abacus_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PayrollError;

/// How a worker is compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentClass {
    /// Paid `rate` per hour worked.
    Hourly,
    /// Paid `rate` per pay period.
    FixedSalary,
    /// Paid per engagement; subject to contractor withholding.
    Contractor,
}

/// Compensation record of one employee or contractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationBasis {
    /// Employment class.
    pub employment_class: EmploymentClass,
    /// Hourly rate, periodic salary, or default engagement amount.
    pub rate: Decimal,
    /// Scheduled hours per period; only meaningful for hourly workers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
}

impl CompensationBasis {
    /// Creates an hourly basis without scheduled hours.
    #[must_use]
    pub fn hourly(rate: Decimal) -> Self {
        Self {
            employment_class: EmploymentClass::Hourly,
            rate,
            hours: None,
        }
    }

    /// Creates a fixed salary basis.
    #[must_use]
    pub fn salary(rate: Decimal) -> Self {
        Self {
            employment_class: EmploymentClass::FixedSalary,
            rate,
            hours: None,
        }
    }

    /// Creates a contractor basis.
    #[must_use]
    pub fn contractor(rate: Decimal) -> Self {
        Self {
            employment_class: EmploymentClass::Contractor,
            rate,
            hours: None,
        }
    }
}

/// How a deduction rule computes its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// `value` percent of gross pay (6.20 means 6.20%).
    Percentage,
    /// `value` as a flat amount.
    FixedAmount,
}

/// A configured payroll deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Name shown on the pay stub.
    pub name: String,
    /// Percentage or fixed amount.
    pub kind: DeductionKind,
    /// Percentage points or flat amount, depending on `kind`.
    pub value: Decimal,
    /// Employment classes the rule applies to.
    pub applies_to: BTreeSet<EmploymentClass>,
    /// Gross pay up to this amount is exempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,
}

impl DeductionRule {
    /// Creates a percentage rule.
    #[must_use]
    pub fn percentage(
        name: impl Into<String>,
        value: Decimal,
        applies_to: impl IntoIterator<Item = EmploymentClass>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: DeductionKind::Percentage,
            value,
            applies_to: applies_to.into_iter().collect(),
            threshold: None,
        }
    }

    /// Creates a fixed amount rule.
    #[must_use]
    pub fn fixed(
        name: impl Into<String>,
        value: Decimal,
        applies_to: impl IntoIterator<Item = EmploymentClass>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: DeductionKind::FixedAmount,
            value,
            applies_to: applies_to.into_iter().collect(),
            threshold: None,
        }
    }

    /// Sets the exempt threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Returns true if the rule applies to the class.
    #[must_use]
    pub fn applies(&self, class: EmploymentClass) -> bool {
        self.applies_to.contains(&class)
    }

    /// Returns the deduction for a gross amount, before rounding, or `None`
    /// if it overflows.
    ///
    /// Percentage rules take `value`% of the gross above the threshold.
    /// Fixed rules contribute their whole value once gross exceeds the
    /// threshold, or always when no threshold is set.
    #[must_use]
    pub fn amount_for(&self, gross: Decimal) -> Option<Decimal> {
        let taxable = match self.threshold {
            Some(threshold) => gross.checked_sub(threshold)?.max(Decimal::ZERO),
            None => gross,
        };

        match self.kind {
            DeductionKind::Percentage => taxable
                .checked_mul(self.value)
                .map(|amount| amount / Decimal::ONE_HUNDRED),
            DeductionKind::FixedAmount => match self.threshold {
                Some(_) if taxable.is_zero() => Some(Decimal::ZERO),
                _ => Some(self.value),
            },
        }
    }

    /// Checks the rule's numeric fields; `index` locates it in the caller's list.
    pub(crate) fn validate(&self, index: usize) -> Result<(), PayrollError> {
        if self.value < Decimal::ZERO {
            return Err(PayrollError::NegativeValue {
                field: format!("rules[{index}].value"),
                value: self.value,
            });
        }
        if let Some(threshold) = self.threshold
            && threshold < Decimal::ZERO
        {
            return Err(PayrollError::NegativeValue {
                field: format!("rules[{index}].threshold"),
                value: threshold,
            });
        }
        Ok(())
    }
}

/// One itemized deduction on a pay stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Rule name.
    pub name: String,
    /// Amount, rounded to currency precision.
    pub amount: Decimal,
}

/// Result of a pay computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStub {
    /// Employment class the stub was computed for.
    pub employment_class: EmploymentClass,
    /// Hours paid, for hourly workers whose gross was not overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<Decimal>,
    /// Pay before deductions.
    pub gross_pay: Decimal,
    /// Deductions in rule declaration order.
    pub deductions: Vec<Deduction>,
    /// Sum of itemized deductions.
    pub total_deductions: Decimal,
    /// `max(0, gross_pay - total_deductions)`.
    pub net_pay: Decimal,
}

impl PayStub {
    /// Returns the amount of a named deduction.
    #[must_use]
    pub fn deduction(&self, name: &str) -> Option<Decimal> {
        self.deductions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.amount)
    }
}

/// Everything needed to compute one pay stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRequest {
    /// Worker the stub is for, echoed back in pay run results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// Compensation record.
    pub basis: CompensationBasis,
    /// Hours worked this period, replacing scheduled hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_override: Option<Decimal>,
    /// Gross pay, replacing the derived amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_override: Option<Decimal>,
    /// Deduction rules in declaration order.
    #[serde(default)]
    pub rules: Vec<DeductionRule>,
}

/// Outcome of one request in a pay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayRunResult {
    /// Worker the result belongs to.
    pub employee_id: Option<EmployeeId>,
    /// The stub, or why it could not be computed.
    pub stub: Result<PayStub, PayrollError>,
}
