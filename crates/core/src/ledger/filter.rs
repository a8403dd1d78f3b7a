//! Filtering expense records for listings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use evenly_shared::types::ParticipantId;

use crate::balance::{ExpenseCategory, ExpenseRecord};

/// Criteria an expense must meet to be listed. Unset fields match anything.
///
/// Date bounds are inclusive. An expense without a date never matches a
/// date bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    /// Participant who paid or owes a share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<ParticipantId>,
    /// Spending category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    /// Earliest expense date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest expense date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Smallest total amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    /// Largest total amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
}

impl ExpenseFilter {
    /// Returns true if the record meets every set criterion.
    #[must_use]
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(participant) = &self.participant
            && !record.involves(participant)
        {
            return false;
        }
        if let Some(category) = self.category
            && record.category != category
        {
            return false;
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = record.expense_date else {
                return false;
            };
            if self.start_date.is_some_and(|start| date < start)
                || self.end_date.is_some_and(|end| date > end)
            {
                return false;
            }
        }
        if self.min_amount.is_some_and(|min| record.amount < min)
            || self.max_amount.is_some_and(|max| record.amount > max)
        {
            return false;
        }
        true
    }

    /// Matching records, newest first. Records without a date come last;
    /// ties keep input order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        let mut matched: Vec<&ExpenseRecord> =
            records.iter().filter(|record| self.matches(record)).collect();
        matched.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        matched
    }
}
