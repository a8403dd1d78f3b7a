//! Net balance aggregation and the zero-sum invariant.

pub mod aggregator;
pub mod error;
pub mod invariant;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::calculate_balances;
pub use error::BalanceError;
pub use invariant::{DEFAULT_TOLERANCE, balance_sum, is_zero_sum, verify_zero_sum};
pub use types::{BalanceMap, ExpenseCategory, ExpenseRecord, SettlementRecord};
