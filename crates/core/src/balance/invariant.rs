//! Zero-sum invariant check.
//!
//! Every expense conserves its amount and every settlement is a balanced
//! transfer, so balances folded from well-formed records always sum to zero.

use rust_decimal::Decimal;

use evenly_shared::types::{CENT, checked_sum};

use super::types::BalanceMap;

/// Default rounding tolerance for balance checks.
pub const DEFAULT_TOLERANCE: Decimal = CENT;

/// Sum of all balances in the map, or `None` if it overflows.
#[must_use]
pub fn balance_sum(balances: &BalanceMap) -> Option<Decimal> {
    checked_sum(balances.values().copied())
}

/// Returns true if the balances sum to zero within `tolerance` (inclusive).
///
/// A sum that overflows is never zero.
#[must_use]
pub fn verify_zero_sum(balances: &BalanceMap, tolerance: Decimal) -> bool {
    balance_sum(balances).is_some_and(|sum| sum.abs() <= tolerance.abs())
}

/// [`verify_zero_sum`] with [`DEFAULT_TOLERANCE`].
#[must_use]
pub fn is_zero_sum(balances: &BalanceMap) -> bool {
    verify_zero_sum(balances, DEFAULT_TOLERANCE)
}
