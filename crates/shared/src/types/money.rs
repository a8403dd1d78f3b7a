//! Fixed-point money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in Evenly is a `rust_decimal::Decimal` carrying at most two
//! significant fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// The smallest representable monetary unit (one cent).
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, MONEY_SCALE);

/// Rounds a value to cents using Banker's Rounding.
///
/// - Rounds 0.125 → 0.12 (to nearest even)
/// - Rounds 0.135 → 0.14 (to nearest even)
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the value has no significant digits below the cent.
///
/// Trailing zeros do not count: `10.000` has money precision, `10.005` does not.
#[must_use]
pub fn has_money_precision(value: Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE
}

/// Sums amounts, returning `None` if the total overflows `Decimal`.
#[must_use]
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}
