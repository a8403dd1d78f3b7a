//! Ledger input and report types.
//!
//! Inputs describe expenses and settlements as the caller submits them.
//! Reports are the shapes handed back to the orchestration layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use evenly_shared::types::{GroupId, ParticipantId};

use crate::balance::{BalanceMap, ExpenseCategory, ExpenseRecord, SettlementRecord};
use crate::settlement::SettlementInstruction;
use crate::split::SplitRequest;

/// An expense that has not been split yet.
///
/// The split parameters are flattened, so the JSON form is a split request
/// with extra `payer`, `description`, `category` and `expense_date` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Who paid the full amount.
    pub payer: ParticipantId,
    /// How the amount is divided.
    #[serde(flatten)]
    pub split: SplitRequest,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Spending category.
    #[serde(default)]
    pub category: ExpenseCategory,
    /// Day the expense happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,
}

impl NewExpense {
    /// Creates a new expense draft.
    #[must_use]
    pub fn new(payer: impl Into<ParticipantId>, split: SplitRequest) -> Self {
        Self {
            payer: payer.into(),
            split,
            description: None,
            category: ExpenseCategory::Other,
            expense_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the expense date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.expense_date = Some(date);
        self
    }

    /// Total amount paid.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.split.amount
    }

    /// Participants sharing the expense.
    #[must_use]
    pub fn participants(&self) -> &[ParticipantId] {
        &self.split.participants
    }
}

/// One expense in a ledger snapshot: either already split or still a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseEntry {
    /// A pre-split record, accepted as is.
    Recorded(ExpenseRecord),
    /// A draft that must go through the split engine first.
    Draft(NewExpense),
}

impl From<ExpenseRecord> for ExpenseEntry {
    fn from(record: ExpenseRecord) -> Self {
        Self::Recorded(record)
    }
}

impl From<NewExpense> for ExpenseEntry {
    fn from(draft: NewExpense) -> Self {
        Self::Draft(draft)
    }
}

/// Everything recorded for a group, as loaded from storage or a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Group the records belong to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Expenses in recording order.
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    /// Settlements in recording order.
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

/// Validated records ready for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRecords {
    /// Group the records belong to, if known.
    pub group_id: Option<GroupId>,
    /// Split expense records.
    pub expenses: Vec<ExpenseRecord>,
    /// Settlement records.
    pub settlements: Vec<SettlementRecord>,
}

/// A participant's net position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    /// The participant.
    pub participant: ParticipantId,
    /// Positive: owed money. Negative: owes money.
    pub balance: Decimal,
}

/// Balances for a group plus the conservation check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Group the balances belong to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Balances in first-appearance order.
    pub balances: Vec<ParticipantBalance>,
    /// Whether the balances sum to zero within the configured tolerance.
    pub is_zero_sum: bool,
}

impl BalanceReport {
    /// Builds a report from an aggregated balance map.
    #[must_use]
    pub fn from_map(group_id: Option<GroupId>, balances: &BalanceMap, is_zero_sum: bool) -> Self {
        Self {
            group_id,
            balances: balances
                .iter()
                .map(|(participant, balance)| ParticipantBalance {
                    participant: participant.clone(),
                    balance: *balance,
                })
                .collect(),
            is_zero_sum,
        }
    }

    /// Looks up one participant's balance.
    #[must_use]
    pub fn balance_of(&self, participant: &ParticipantId) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|entry| &entry.participant == participant)
            .map(|entry| entry.balance)
    }
}

/// Suggested transfers that settle a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyReport {
    /// Group the transfers belong to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Transfers in emission order.
    pub transactions: Vec<SettlementInstruction>,
    /// Number of transfers.
    pub total_transactions: usize,
}

impl SimplifyReport {
    /// Builds a report from simplifier output.
    #[must_use]
    pub fn new(group_id: Option<GroupId>, transactions: Vec<SettlementInstruction>) -> Self {
        let total_transactions = transactions.len();
        Self {
            group_id,
            transactions,
            total_transactions,
        }
    }
}
