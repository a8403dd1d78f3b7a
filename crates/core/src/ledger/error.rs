//! Ledger error types for record validation.
//!
//! This module defines the errors raised while turning caller input into
//! expense and settlement records. Split failures are wrapped unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use evenly_shared::AppError;
use evenly_shared::types::ParticipantId;

use crate::balance::BalanceError;
use crate::split::SplitError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Split Errors ==========
    /// The split engine rejected the expense.
    #[error(transparent)]
    Split(#[from] SplitError),

    // ========== Balance Errors ==========
    /// Folding the records overflowed a balance.
    #[error(transparent)]
    Balance(#[from] BalanceError),

    // ========== Expense Errors ==========
    /// More participants than the group allows.
    #[error("Maximum {max} participants allowed per expense, got {actual}")]
    TooManyParticipants {
        /// Configured cap.
        max: usize,
        /// Participants supplied.
        actual: usize,
    },

    /// A participant was listed more than once.
    #[error("Participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    // ========== Settlement Errors ==========
    /// Payer and receiver are the same participant.
    #[error("Settlement payer and receiver must be different, got {0} for both")]
    SelfSettlement(ParticipantId),

    /// Settlement amount is not a positive cent amount.
    #[error("Settlement amount must be a positive amount with at most two decimals, got {0}")]
    InvalidSettlementAmount(Decimal),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Split(err) => err.error_code(),
            Self::Balance(err) => err.error_code(),
            Self::TooManyParticipants { .. } => "TOO_MANY_PARTICIPANTS",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::SelfSettlement(_) => "SELF_SETTLEMENT",
            Self::InvalidSettlementAmount(_) => "INVALID_SETTLEMENT_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 422 Unprocessable - well-formed but against group rules
            Self::TooManyParticipants { .. } => 422,
            Self::Balance(err) => err.http_status_code(),

            // 400 Bad Request - validation errors
            Self::Split(_)
            | Self::DuplicateParticipant(_)
            | Self::SelfSettlement(_)
            | Self::InvalidSettlementAmount(_) => 400,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Split(split) => split.into(),
            LedgerError::Balance(balance) => balance.into(),
            LedgerError::TooManyParticipants { .. } => Self::BusinessRule(err.to_string()),
            LedgerError::DuplicateParticipant(_)
            | LedgerError::SelfSettlement(_)
            | LedgerError::InvalidSettlementAmount(_) => Self::Validation(err.to_string()),
        }
    }
}
