//! Split engine error types.
//!
//! Every variant is a caller-correctable input problem. The engine never
//! retries and never returns a partial allocation.

use rust_decimal::Decimal;
use thiserror::Error;

use evenly_shared::AppError;

use super::types::SplitPolicy;

/// Errors that can occur while splitting an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Non-positive amount, non-positive participant count, or empty
    /// participant list.
    #[error("Invalid split input: {0}")]
    InvalidInput(String),

    /// The selected policy needs per-participant parameters that are absent
    /// or do not match the participant count.
    #[error("{policy} split requires {expected} values, got {actual}")]
    MissingParameters {
        /// The policy that was selected.
        policy: SplitPolicy,
        /// Number of participants.
        expected: usize,
        /// Number of values supplied (0 when absent).
        actual: usize,
    },

    /// Custom amounts do not sum exactly to the total.
    #[error("Custom amounts ({sum}) do not sum to total amount. Difference: {difference}")]
    SplitMismatch {
        /// Sum of the supplied amounts.
        sum: Decimal,
        /// Total amount minus the supplied sum.
        difference: Decimal,
    },

    /// Percentages do not sum to 100 within tolerance.
    #[error("Percentages must sum to 100. Got: {sum}")]
    PercentageMismatch {
        /// Sum of the supplied percentages.
        sum: Decimal,
    },

    /// A supplied custom amount or percentage is negative.
    #[error("Split values cannot be negative: {0}")]
    NegativeAmount(Decimal),
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingParameters { .. } => "MISSING_PARAMETERS",
            Self::SplitMismatch { .. } => "SPLIT_MISMATCH",
            Self::PercentageMismatch { .. } => "PERCENTAGE_MISMATCH",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// All split failures are validation failures.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        Self::Validation(err.to_string())
    }
}
