//! Folding expense and settlement records into net balances.

use rust_decimal::Decimal;

use evenly_shared::types::ParticipantId;

use super::error::BalanceError;
use super::types::{BalanceMap, ExpenseRecord, SettlementRecord};

/// Computes every participant's net balance.
///
/// - Expense: the payer is credited the full amount, and every split line
///   debits its participant. A payer who also appears in the splits nets to
///   `amount - own_share`.
/// - Settlement: the payer is debited and the receiver credited.
///
/// Records are applied in input order, expenses first. Participants that
/// appear in no record are absent from the result.
///
/// # Errors
///
/// Returns `Overflow` if a running balance leaves the `Decimal` range.
pub fn calculate_balances(
    expenses: &[ExpenseRecord],
    settlements: &[SettlementRecord],
) -> Result<BalanceMap, BalanceError> {
    let mut balances = BalanceMap::new();

    for expense in expenses {
        credit(&mut balances, &expense.payer, expense.amount)?;
        for split in &expense.splits {
            debit(&mut balances, &split.participant, split.amount)?;
        }
    }

    for settlement in settlements {
        debit(&mut balances, &settlement.payer, settlement.amount)?;
        credit(&mut balances, &settlement.receiver, settlement.amount)?;
    }

    Ok(balances)
}

pub(crate) fn credit(
    balances: &mut BalanceMap,
    participant: &ParticipantId,
    amount: Decimal,
) -> Result<(), BalanceError> {
    let balance = balances.entry(participant.clone()).or_insert(Decimal::ZERO);
    *balance = balance
        .checked_add(amount)
        .ok_or_else(|| BalanceError::Overflow(participant.clone()))?;
    Ok(())
}

pub(crate) fn debit(
    balances: &mut BalanceMap,
    participant: &ParticipantId,
    amount: Decimal,
) -> Result<(), BalanceError> {
    let balance = balances.entry(participant.clone()).or_insert(Decimal::ZERO);
    *balance = balance
        .checked_sub(amount)
        .ok_or_else(|| BalanceError::Overflow(participant.clone()))?;
    Ok(())
}
