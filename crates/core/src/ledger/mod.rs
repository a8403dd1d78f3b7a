//! Ledger orchestration.
//!
//! Validates caller input, runs it through the split engine and folds the
//! resulting records into balance and settlement reports.

pub mod error;
pub mod filter;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use filter::ExpenseFilter;
pub use service::{DEFAULT_MAX_PARTICIPANTS, LedgerService};
pub use types::{
    BalanceReport, ExpenseEntry, LedgerRecords, LedgerSnapshot, NewExpense, ParticipantBalance,
    SimplifyReport,
};
