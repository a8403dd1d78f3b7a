//! Greedy debt simplification.
//!
//! Matches the largest outstanding debtor against the largest outstanding
//! creditor until one side runs out. This is a heuristic: it emits at most
//! `debtors + creditors - 1` transfers but is not a minimum-transfer solver.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use evenly_shared::types::ParticipantId;

use crate::balance::aggregator::{credit, debit};
use crate::balance::{BalanceError, BalanceMap, DEFAULT_TOLERANCE};

/// A proposed transfer that moves `amount` from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// The participant who pays.
    pub from: ParticipantId,
    /// The participant who receives.
    pub to: ParticipantId,
    /// Amount to transfer (always positive).
    pub amount: Decimal,
}

impl SettlementInstruction {
    /// Creates a settlement instruction.
    #[must_use]
    pub fn new(from: impl Into<ParticipantId>, to: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Proposes transfers that bring every balance within `tolerance` of zero.
///
/// 1. Participants below `-tolerance` are debtors, above `tolerance`
///    creditors. Everyone else, including balances exactly at the tolerance,
///    is treated as settled.
/// 2. Both sides are sorted by magnitude, largest first. The sort is stable,
///    so ties keep the map's iteration order.
/// 3. A two-pointer sweep settles `min(remaining debt, remaining credit)` per
///    step and moves past a participant once their remainder drops below the
///    tolerance.
///
/// A negative tolerance is treated as its absolute value.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use evenly_core::ParticipantId;
/// use evenly_core::balance::BalanceMap;
/// use evenly_core::settlement::{SettlementInstruction, simplify_debts};
///
/// let balances: BalanceMap = [
///     (ParticipantId::from("alice"), dec!(50.00)),
///     (ParticipantId::from("bob"), dec!(-30.00)),
///     (ParticipantId::from("charlie"), dec!(-20.00)),
/// ]
/// .into_iter()
/// .collect();
///
/// let transfers = simplify_debts(&balances, dec!(0.01));
/// assert_eq!(
///     transfers,
///     vec![
///         SettlementInstruction::new("bob", "alice", dec!(30.00)),
///         SettlementInstruction::new("charlie", "alice", dec!(20.00)),
///     ]
/// );
/// ```
#[must_use]
pub fn simplify_debts(balances: &BalanceMap, tolerance: Decimal) -> Vec<SettlementInstruction> {
    let tolerance = tolerance.abs();

    let mut debtors: Vec<(&ParticipantId, Decimal)> = balances
        .iter()
        .filter(|(_, balance)| **balance < -tolerance)
        .map(|(participant, balance)| (participant, balance.abs()))
        .collect();
    let mut creditors: Vec<(&ParticipantId, Decimal)> = balances
        .iter()
        .filter(|(_, balance)| **balance > tolerance)
        .map(|(participant, balance)| (participant, *balance))
        .collect();

    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut instructions = Vec::new();
    let (mut i, mut j) = (0, 0);
    let mut current_debt = debtors.first().map_or(Decimal::ZERO, |d| d.1);
    let mut current_credit = creditors.first().map_or(Decimal::ZERO, |c| c.1);

    while i < debtors.len() && j < creditors.len() {
        let amount = current_debt.min(current_credit);
        instructions.push(SettlementInstruction {
            from: debtors[i].0.clone(),
            to: creditors[j].0.clone(),
            amount,
        });

        current_debt -= amount;
        current_credit -= amount;

        if is_settled(current_debt, tolerance) {
            i += 1;
            if let Some(next) = debtors.get(i) {
                current_debt = next.1;
            }
        }
        if is_settled(current_credit, tolerance) {
            j += 1;
            if let Some(next) = creditors.get(j) {
                current_credit = next.1;
            }
        }
    }

    instructions
}

/// [`simplify_debts`] with [`DEFAULT_TOLERANCE`].
#[must_use]
pub fn simplify(balances: &BalanceMap) -> Vec<SettlementInstruction> {
    simplify_debts(balances, DEFAULT_TOLERANCE)
}

/// Returns the balances left over after applying the instructions.
///
/// Each instruction credits its `from` and debits its `to`. This is the
/// inverse of how a `SettlementRecord` is folded into balances, where the
/// payer is debited. Participants missing from the map are added.
///
/// # Errors
///
/// Returns `Overflow` if a residual balance leaves the `Decimal` range.
pub fn apply_instructions(
    balances: &BalanceMap,
    instructions: &[SettlementInstruction],
) -> Result<BalanceMap, BalanceError> {
    let mut residual = balances.clone();
    for instruction in instructions {
        credit(&mut residual, &instruction.from, instruction.amount)?;
        debit(&mut residual, &instruction.to, instruction.amount)?;
    }
    Ok(residual)
}

// A zero remainder always counts as settled, otherwise a zero tolerance
// would keep emitting empty transfers.
fn is_settled(remaining: Decimal, tolerance: Decimal) -> bool {
    remaining < tolerance || remaining <= Decimal::ZERO
}
