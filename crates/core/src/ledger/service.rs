//! Ledger service for recording expenses and settlements and reporting on them.

use std::collections::HashSet;

use rust_decimal::Decimal;

use evenly_shared::LedgerConfig;
use evenly_shared::types::{GroupId, ParticipantId, has_money_precision};

use super::error::LedgerError;
use super::filter::ExpenseFilter;
use super::types::{
    BalanceReport, ExpenseEntry, LedgerRecords, LedgerSnapshot, NewExpense, SimplifyReport,
};
use crate::balance::{
    DEFAULT_TOLERANCE, ExpenseRecord, SettlementRecord, calculate_balances, verify_zero_sum,
};
use crate::settlement::simplify_debts;
use crate::split::{SplitEngine, SplitError};

/// Default cap on participants per expense.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 4;

/// Validates caller input and runs the pure ledger routines.
///
/// Holds no records itself; every report is computed from the records
/// passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerService {
    tolerance: Decimal,
    max_participants: Option<usize>,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_participants: Some(DEFAULT_MAX_PARTICIPANTS),
        }
    }
}

impl LedgerService {
    /// Creates a service from ledger configuration.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            tolerance: config.tolerance.abs(),
            max_participants: config.participant_cap(),
        }
    }

    /// Overrides the participant cap. `None` disables it.
    #[must_use]
    pub fn with_max_participants(mut self, max_participants: Option<usize>) -> Self {
        self.max_participants = max_participants.filter(|max| *max > 0);
        self
    }

    /// Overrides the balance tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Tolerance used for the zero-sum check and simplification.
    #[must_use]
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Participant cap, if any.
    #[must_use]
    pub fn max_participants(&self) -> Option<usize> {
        self.max_participants
    }

    /// Splits a new expense and returns the record to persist.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No participants are listed
    /// - More participants than the cap allows
    /// - A participant appears twice
    /// - The split engine rejects the amount or parameters
    pub fn record_expense(&self, expense: &NewExpense) -> Result<ExpenseRecord, LedgerError> {
        let participants = expense.participants();

        if participants.is_empty() {
            return Err(SplitError::InvalidInput("At least one participant required".to_string()).into());
        }

        if let Some(max) = self.max_participants
            && participants.len() > max
        {
            return Err(LedgerError::TooManyParticipants {
                max,
                actual: participants.len(),
            });
        }

        if let Some(duplicate) = first_duplicate(participants) {
            return Err(LedgerError::DuplicateParticipant(duplicate.clone()));
        }

        let allocation = SplitEngine::create_splits(&expense.split)?;

        let mut record =
            ExpenseRecord::from_allocation(expense.payer.clone(), expense.amount(), allocation)
                .with_category(expense.category);
        record.description.clone_from(&expense.description);
        record.expense_date = expense.expense_date;

        Ok(record)
    }

    /// Validates a direct payment between two participants.
    ///
    /// # Errors
    ///
    /// Returns error if payer and receiver are the same, or the amount is not
    /// a positive cent amount.
    pub fn record_settlement(
        &self,
        payer: impl Into<ParticipantId>,
        receiver: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Result<SettlementRecord, LedgerError> {
        let payer = payer.into();
        let receiver = receiver.into();

        if payer == receiver {
            return Err(LedgerError::SelfSettlement(payer));
        }

        if amount <= Decimal::ZERO || !has_money_precision(amount) {
            return Err(LedgerError::InvalidSettlementAmount(amount));
        }

        Ok(SettlementRecord::new(payer, receiver, amount))
    }

    /// Splits drafts and validates settlements in a snapshot.
    ///
    /// Pre-split expense records are accepted unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Self::record_expense`] or
    /// [`Self::record_settlement`].
    pub fn load_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<LedgerRecords, LedgerError> {
        let expenses = snapshot
            .expenses
            .iter()
            .map(|entry| match entry {
                ExpenseEntry::Recorded(record) => Ok(record.clone()),
                ExpenseEntry::Draft(draft) => self.record_expense(draft),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let settlements = snapshot
            .settlements
            .iter()
            .map(|s| self.record_settlement(s.payer.clone(), s.receiver.clone(), s.amount))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LedgerRecords {
            group_id: snapshot.group_id,
            expenses,
            settlements,
        })
    }

    /// Per-participant balances and the zero-sum outcome.
    ///
    /// # Errors
    ///
    /// Returns `Balance` if a running balance leaves the `Decimal` range.
    pub fn balances(
        &self,
        group_id: Option<GroupId>,
        expenses: &[ExpenseRecord],
        settlements: &[SettlementRecord],
    ) -> Result<BalanceReport, LedgerError> {
        let map = calculate_balances(expenses, settlements)?;
        let is_zero_sum = verify_zero_sum(&map, self.tolerance);
        Ok(BalanceReport::from_map(group_id, &map, is_zero_sum))
    }

    /// Suggested transfers that settle every balance.
    ///
    /// # Errors
    ///
    /// Returns `Balance` if a running balance leaves the `Decimal` range.
    pub fn simplify(
        &self,
        group_id: Option<GroupId>,
        expenses: &[ExpenseRecord],
        settlements: &[SettlementRecord],
    ) -> Result<SimplifyReport, LedgerError> {
        let map = calculate_balances(expenses, settlements)?;
        Ok(SimplifyReport::new(group_id, simplify_debts(&map, self.tolerance)))
    }

    /// Balance report for validated records.
    ///
    /// # Errors
    ///
    /// See [`Self::balances`].
    pub fn balance_report(&self, records: &LedgerRecords) -> Result<BalanceReport, LedgerError> {
        self.balances(records.group_id, &records.expenses, &records.settlements)
    }

    /// Simplify report for validated records.
    ///
    /// # Errors
    ///
    /// See [`Self::simplify`].
    pub fn simplify_report(&self, records: &LedgerRecords) -> Result<SimplifyReport, LedgerError> {
        self.simplify(records.group_id, &records.expenses, &records.settlements)
    }

    /// Expense records matching a filter, newest first.
    #[must_use]
    pub fn filter_expenses<'a>(
        &self,
        records: &'a LedgerRecords,
        filter: &ExpenseFilter,
    ) -> Vec<&'a ExpenseRecord> {
        filter.apply(&records.expenses)
    }
}

fn first_duplicate(participants: &[ParticipantId]) -> Option<&ParticipantId> {
    let mut seen = HashSet::with_capacity(participants.len());
    participants.iter().find(|p| !seen.insert(*p))
}
