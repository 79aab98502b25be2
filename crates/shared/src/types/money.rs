//! Money rounding policy.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values. Rates and percentages are
//! applied at full precision and the resulting amount is rounded exactly once,
//! half away from zero, to [`MONEY_SCALE`] decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for currency amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a computed amount to currency precision.
///
/// Uses round-half-away-from-zero, so `0.125` becomes `0.13` and `-0.125`
/// becomes `-0.13`. The result always carries exactly two decimal places,
/// which keeps serialized output stable (`"20.00"`, not `"20"`).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use abacus_shared::types::round_money;
///
/// assert_eq!(round_money(dec!(55.8049)).to_string(), "55.80");
/// assert_eq!(round_money(dec!(0.005)).to_string(), "0.01");
/// ```
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Compares two amounts at currency precision.
///
/// Values that differ only beyond the second decimal compare equal.
#[must_use]
pub fn is_money_equal(a: Decimal, b: Decimal) -> bool {
    round_money(a) == round_money(b)
}
