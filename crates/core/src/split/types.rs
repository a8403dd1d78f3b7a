//! Split policies, requests, and allocations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use evenly_shared::types::{ParticipantId, checked_sum};

use super::error::SplitError;

/// How an expense total is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Everyone owes the same share; leftover cents go to the first participants.
    Equal,
    /// Caller supplies every share; the engine only validates them.
    Custom,
    /// Caller supplies a percentage per participant.
    Percentage,
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Custom => write!(f, "custom"),
            Self::Percentage => write!(f, "percentage"),
        }
    }
}

impl std::str::FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "custom" => Ok(Self::Custom),
            "percentage" => Ok(Self::Percentage),
            _ => Err(format!("Unknown split policy: {s}")),
        }
    }
}

/// A split policy bound to its per-participant parameters.
///
/// Produced by [`SplitRequest::rule`]; the engine matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule<'a> {
    /// Equal shares.
    Equal,
    /// Caller-supplied amounts, one per participant.
    Custom(&'a [Decimal]),
    /// Caller-supplied percentages (0-100), one per participant.
    Percentage(&'a [Decimal]),
}

/// A request to split an amount among an ordered list of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    /// Total amount to split.
    pub amount: Decimal,
    /// Policy to apply.
    pub policy: SplitPolicy,
    /// Participants in the order that decides rounding.
    pub participants: Vec<ParticipantId>,
    /// Per-participant amounts, required for [`SplitPolicy::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_amounts: Option<Vec<Decimal>>,
    /// Per-participant percentages, required for [`SplitPolicy::Percentage`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentages: Option<Vec<Decimal>>,
}

impl SplitRequest {
    /// Creates an equal split request.
    #[must_use]
    pub fn equal(amount: Decimal, participants: Vec<ParticipantId>) -> Self {
        Self {
            amount,
            policy: SplitPolicy::Equal,
            participants,
            custom_amounts: None,
            percentages: None,
        }
    }

    /// Creates a custom split request.
    #[must_use]
    pub fn custom(
        amount: Decimal,
        participants: Vec<ParticipantId>,
        custom_amounts: Vec<Decimal>,
    ) -> Self {
        Self {
            amount,
            policy: SplitPolicy::Custom,
            participants,
            custom_amounts: Some(custom_amounts),
            percentages: None,
        }
    }

    /// Creates a percentage split request.
    #[must_use]
    pub fn percentage(
        amount: Decimal,
        participants: Vec<ParticipantId>,
        percentages: Vec<Decimal>,
    ) -> Self {
        Self {
            amount,
            policy: SplitPolicy::Percentage,
            participants,
            custom_amounts: None,
            percentages: Some(percentages),
        }
    }

    /// Binds the policy to its parameters.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameters` if the policy needs parameters that are
    /// absent or not one per participant.
    pub fn rule(&self) -> Result<SplitRule<'_>, SplitError> {
        match self.policy {
            SplitPolicy::Equal => Ok(SplitRule::Equal),
            SplitPolicy::Custom => self
                .parameters(self.custom_amounts.as_deref())
                .map(SplitRule::Custom),
            SplitPolicy::Percentage => self
                .parameters(self.percentages.as_deref())
                .map(SplitRule::Percentage),
        }
    }

    fn parameters<'a>(&self, values: Option<&'a [Decimal]>) -> Result<&'a [Decimal], SplitError> {
        let expected = self.participants.len();
        match values {
            Some(values) if values.len() == expected => Ok(values),
            other => Err(SplitError::MissingParameters {
                policy: self.policy,
                expected,
                actual: other.map_or(0, <[Decimal]>::len),
            }),
        }
    }
}

/// One participant's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLine {
    /// The participant who owes the share.
    pub participant: ParticipantId,
    /// The owed amount.
    pub amount: Decimal,
}

impl SplitLine {
    /// Creates a split line.
    #[must_use]
    pub fn new(participant: impl Into<ParticipantId>, amount: Decimal) -> Self {
        Self {
            participant: participant.into(),
            amount,
        }
    }
}

/// Ordered per-participant allocation, one line per input participant.
///
/// For every successful split the amounts sum exactly to the split total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(Vec<SplitLine>);

impl Allocation {
    /// Pairs participants with amounts, preserving input order.
    pub(crate) fn from_parts(participants: &[ParticipantId], amounts: Vec<Decimal>) -> Self {
        Self(
            participants
                .iter()
                .cloned()
                .zip(amounts)
                .map(|(participant, amount)| SplitLine {
                    participant,
                    amount,
                })
                .collect(),
        )
    }

    /// Returns the allocation lines in input order.
    #[must_use]
    pub fn lines(&self) -> &[SplitLine] {
        &self.0
    }

    /// Returns the amount allocated to a participant.
    ///
    /// If a participant was listed more than once, the first line wins.
    #[must_use]
    pub fn get(&self, participant: &ParticipantId) -> Option<Decimal> {
        self.0
            .iter()
            .find(|line| &line.participant == participant)
            .map(|line| line.amount)
    }

    /// Returns the amounts in input order.
    #[must_use]
    pub fn amounts(&self) -> Vec<Decimal> {
        self.0.iter().map(|line| line.amount).collect()
    }

    /// Returns the sum of all allocated amounts, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        checked_sum(self.0.iter().map(|line| line.amount))
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the allocation has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the lines in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, SplitLine> {
        self.0.iter()
    }

    /// Consumes the allocation, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<SplitLine> {
        self.0
    }
}

impl IntoIterator for Allocation {
    type Item = SplitLine;
    type IntoIter = std::vec::IntoIter<SplitLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = &'a SplitLine;
    type IntoIter = std::slice::Iter<'a, SplitLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
