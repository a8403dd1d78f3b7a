//! Record shapes consumed by the balance aggregator.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use evenly_shared::types::{ParticipantId, checked_sum};

use crate::split::{Allocation, SplitLine};

/// Net position of every participant that appears in at least one record.
///
/// Positive: the group owes the participant. Negative: the participant owes
/// the group. Keys iterate in first-appearance order.
pub type BalanceMap = IndexMap<ParticipantId, Decimal>;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Groceries, restaurants.
    Food,
    /// Transport, lodging.
    Travel,
    /// Events, outings.
    Entertainment,
    /// Purchases.
    Shopping,
    /// Rent, utilities.
    Bills,
    /// Anything else.
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Returns the category name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown expense category: {s}")),
        }
    }
}

/// An expense as seen by the aggregator.
///
/// Callers guarantee that the split amounts sum to `amount`; the split
/// engine produces records that satisfy this by construction. The
/// descriptive fields are carried for filtering and never affect balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Who paid the full amount.
    pub payer: ParticipantId,
    /// Total paid.
    pub amount: Decimal,
    /// Who owes what.
    pub splits: Vec<SplitLine>,
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

impl ExpenseRecord {
    /// Creates an expense record from explicit split lines.
    #[must_use]
    pub fn new(payer: impl Into<ParticipantId>, amount: Decimal, splits: Vec<SplitLine>) -> Self {
        Self {
            payer: payer.into(),
            amount,
            splits,
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

    /// Returns true if the participant paid or owes a share.
    #[must_use]
    pub fn involves(&self, participant: &ParticipantId) -> bool {
        &self.payer == participant || self.splits.iter().any(|line| &line.participant == participant)
    }

    /// Creates an expense record from a split engine allocation.
    #[must_use]
    pub fn from_allocation(
        payer: impl Into<ParticipantId>,
        amount: Decimal,
        allocation: Allocation,
    ) -> Self {
        Self::new(payer, amount, allocation.into_lines())
    }

    /// Sum of the owed amounts across all split lines, or `None` on overflow.
    #[must_use]
    pub fn split_total(&self) -> Option<Decimal> {
        checked_sum(self.splits.iter().map(|line| line.amount))
    }
}

/// A direct payment from one participant to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Who paid.
    pub payer: ParticipantId,
    /// Who received the payment.
    pub receiver: ParticipantId,
    /// Amount transferred (positive).
    pub amount: Decimal,
}

impl SettlementRecord {
    /// Creates a settlement record.
    #[must_use]
    pub fn new(
        payer: impl Into<ParticipantId>,
        receiver: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Self {
        Self {
            payer: payer.into(),
            receiver: receiver.into(),
            amount,
        }
    }
}
