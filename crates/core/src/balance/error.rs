//! Balance aggregation errors.

use thiserror::Error;

use evenly_shared::AppError;
use evenly_shared::types::ParticipantId;

/// Errors raised while folding records into balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// A running balance left the range `Decimal` can represent.
    #[error("Balance of {0} overflowed")]
    Overflow(ParticipantId),
}

impl BalanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Overflow(_) => "BALANCE_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Overflow(_) => 422,
        }
    }
}

impl From<BalanceError> for AppError {
    fn from(err: BalanceError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}
