//! Tax domain types.

use std::collections::BTreeSet;

use abacus_shared::types::TaxRuleId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of positional tax slots in documents created before tax rules
/// were keyed by identifier.
pub const LEGACY_SLOT_COUNT: usize = 4;

/// A configured tax.
///
/// Rules are identified by a stable [`TaxRuleId`]; the breakdown groups
/// them by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Stable identifier lines refer to when opting in.
    pub id: TaxRuleId,
    /// Display name; rules sharing a name share a breakdown row.
    pub name: String,
    /// Fractional rate, e.g. `0.0825` for 8.25%.
    pub rate: Decimal,
}

impl TaxRule {
    /// Creates a rule with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            id: TaxRuleId::new(),
            name: name.into(),
            rate,
        }
    }

    /// Creates the rule for legacy positional slot `slot` (1-4).
    #[must_use]
    pub fn slot(slot: u8, name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            id: TaxRuleId::slot(slot),
            name: name.into(),
            rate,
        }
    }

    /// Returns the name used to group breakdown rows.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// Returns true if the rule can accrue tax.
    ///
    /// A rule with an empty name means "no tax configured" even if a rate
    /// was entered, and a zero rate never produces a breakdown row.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rate > Decimal::ZERO && !self.display_name().is_empty()
    }
}

/// One priced row of a sales or purchase document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Quantity sold; never negative.
    pub quantity: Decimal,
    /// Price per unit; negative for credit and discount lines.
    pub unit_price: Decimal,
    /// Tax rules this line opts into.
    #[serde(default)]
    pub tax_flags: BTreeSet<TaxRuleId>,
}

impl LineItem {
    /// Creates an untaxed line.
    #[must_use]
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            tax_flags: BTreeSet::new(),
        }
    }

    /// Creates a line from legacy slot flags; `flags[0]` is slot 1.
    #[must_use]
    pub fn with_slots(
        quantity: Decimal,
        unit_price: Decimal,
        flags: [bool; LEGACY_SLOT_COUNT],
    ) -> Self {
        let tax_flags = (1u8..)
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(slot, _)| TaxRuleId::slot(slot))
            .collect();
        Self {
            quantity,
            unit_price,
            tax_flags,
        }
    }

    /// Opts the line into a tax rule.
    #[must_use]
    pub fn taxed_by(mut self, rule: TaxRuleId) -> Self {
        self.tax_flags.insert(rule);
        self
    }

    /// Returns `quantity × unit_price` without rounding, or `None` if the
    /// product overflows.
    #[must_use]
    pub fn line_subtotal(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }

    /// Returns true if the line opts into the given rule.
    #[must_use]
    pub fn is_taxed_by(&self, rule: TaxRuleId) -> bool {
        self.tax_flags.contains(&rule)
    }
}

/// Tax accrued under one tax name across the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Tax name shared by every contributing rule.
    pub tax_name: String,
    /// Rate of the first declared rule with this name.
    pub rate: Decimal,
    /// Accrued amount, rounded to currency precision.
    pub amount: Decimal,
}

/// Per-line totals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// `quantity × unit_price`, rounded to currency precision.
    pub line_subtotal: Decimal,
    /// Tax accrued on this line across all its rules, rounded once.
    pub tax_amount: Decimal,
}

/// Result of a document tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSummary {
    /// Sum of line subtotals, rounded to currency precision.
    pub subtotal: Decimal,
    /// One row per distinct active tax name, in rule declaration order.
    pub breakdown: Vec<TaxBreakdown>,
    /// `subtotal + Σ breakdown.amount`, rounded to currency precision.
    pub grand_total: Decimal,
    /// Per-line totals, parallel to the input lines.
    pub lines: Vec<LineTotals>,
    #[serde(skip)]
    pub(crate) unrounded_grand_total: Decimal,
}

impl TaxSummary {
    /// Returns the sum of breakdown amounts.
    #[must_use]
    pub fn total_tax(&self) -> Decimal {
        self.breakdown.iter().map(|b| b.amount).sum()
    }

    /// Returns the grand total before any rounding took place.
    ///
    /// Summing this across sub-documents and rounding once reconciles with
    /// computing the combined document directly.
    #[must_use]
    pub fn unrounded_grand_total(&self) -> Decimal {
        self.unrounded_grand_total
    }

    /// Returns the breakdown row for a tax name.
    #[must_use]
    pub fn tax(&self, name: &str) -> Option<&TaxBreakdown> {
        self.breakdown.iter().find(|b| b.tax_name == name)
    }
}
