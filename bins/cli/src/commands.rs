//! Command handlers.
//!
//! Each handler takes raw JSON input and returns the value to print.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use evenly_core::balance::ExpenseRecord;
use evenly_core::ledger::{
    BalanceReport, ExpenseFilter, LedgerService, LedgerSnapshot, SimplifyReport,
};
use evenly_core::split::{Allocation, SplitEngine, SplitRequest};
use evenly_shared::{AppError, AppResult};

/// Reads the whole input from a file, or from stdin when the path is `-`.
pub fn read_input(path: &Path) -> AppResult<String> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| AppError::Internal(format!("Failed to read stdin: {e}")))?;
    } else {
        raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::NotFound(format!("Failed to read {}: {e}", path.display()))
        })?;
    }
    Ok(raw)
}

fn parse<T: DeserializeOwned>(raw: &str) -> AppResult<T> {
    serde_json::from_str(raw).map_err(|e| AppError::Validation(format!("Invalid JSON input: {e}")))
}

/// Splits one expense.
pub fn split(raw: &str) -> AppResult<Allocation> {
    let request: SplitRequest = parse(raw)?;
    debug!(
        policy = %request.policy,
        participants = request.participants.len(),
        amount = %request.amount,
        "Splitting expense"
    );

    let allocation = SplitEngine::create_splits(&request)?;
    info!(participants = allocation.len(), "Expense split");

    Ok(allocation)
}

/// Computes balances for a ledger snapshot.
pub fn balances(service: &LedgerService, raw: &str) -> AppResult<BalanceReport> {
    let snapshot: LedgerSnapshot = parse(raw)?;
    let records = service.load_snapshot(&snapshot)?;
    info!(
        expenses = records.expenses.len(),
        settlements = records.settlements.len(),
        "Ledger loaded"
    );

    let report = service.balance_report(&records)?;
    if report.is_zero_sum {
        info!(participants = report.balances.len(), "Balances computed");
    } else {
        warn!(
            participants = report.balances.len(),
            tolerance = %service.tolerance(),
            "Balances do not sum to zero"
        );
    }

    Ok(report)
}

/// Computes suggested transfers for a ledger snapshot.
pub fn simplify(service: &LedgerService, raw: &str) -> AppResult<SimplifyReport> {
    let snapshot: LedgerSnapshot = parse(raw)?;
    let records = service.load_snapshot(&snapshot)?;
    info!(
        expenses = records.expenses.len(),
        settlements = records.settlements.len(),
        "Ledger loaded"
    );

    let report = service.simplify_report(&records)?;
    info!(transactions = report.total_transactions, "Debts simplified");

    Ok(report)
}

/// Lists the expenses of a ledger snapshot that match a filter.
pub fn expenses(
    service: &LedgerService,
    raw: &str,
    filter: &ExpenseFilter,
) -> AppResult<Vec<ExpenseRecord>> {
    let snapshot: LedgerSnapshot = parse(raw)?;
    let records = service.load_snapshot(&snapshot)?;
    debug!(?filter, expenses = records.expenses.len(), "Filtering expenses");

    let matched: Vec<ExpenseRecord> = service
        .filter_expenses(&records, filter)
        .into_iter()
        .cloned()
        .collect();
    info!(matched = matched.len(), "Expenses listed");

    Ok(matched)
}
