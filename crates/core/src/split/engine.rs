//! Exact-cent split engine.
//!
//! Every successful split sums exactly to the input total. Rounding uses
//! Banker's Rounding (MidpointNearestEven) at two decimal places, and leftover
//! cents are placed deterministically:
//! - Equal: one cent each to the first participants, in input order
//! - Percentage: the whole remainder to the largest share (earliest on ties)
//! - Custom: nothing to place, the supplied amounts are only validated

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use evenly_shared::types::{CENT, checked_sum, has_money_precision, round_money};

use super::error::SplitError;
use super::types::{Allocation, SplitRequest, SplitRule};

/// Allowed deviation of a percentage list from 100, in percentage points.
pub const PERCENTAGE_TOLERANCE: Decimal = CENT;

/// Split engine for equal, custom, and percentage splits.
pub struct SplitEngine;

impl SplitEngine {
    /// Split a request into an allocation keyed by its participants.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the participant list is empty or the amount is
    ///   not a positive cent amount
    /// - `MissingParameters` if custom/percentage values are absent or
    ///   mis-sized
    /// - the policy-specific errors of [`Self::split_custom`] and
    ///   [`Self::split_percentage`]
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use evenly_core::split::{SplitEngine, SplitRequest};
    ///
    /// let request = SplitRequest::equal(dec!(10.00), vec!["a".into(), "b".into(), "c".into()]);
    /// let allocation = SplitEngine::create_splits(&request).unwrap();
    /// assert_eq!(allocation.amounts(), vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
    /// ```
    pub fn create_splits(request: &SplitRequest) -> Result<Allocation, SplitError> {
        if request.participants.is_empty() {
            return Err(SplitError::InvalidInput(
                "At least one participant required".to_string(),
            ));
        }

        let amounts = match request.rule()? {
            SplitRule::Equal => Self::split_equal(request.amount, request.participants.len())?,
            SplitRule::Custom(amounts) => Self::split_custom(request.amount, amounts)?,
            SplitRule::Percentage(percentages) => {
                Self::split_percentage(request.amount, percentages)?
            }
        };

        Ok(Allocation::from_parts(&request.participants, amounts))
    }

    /// Split an amount equally among `count` participants.
    ///
    /// The base share is `amount / count` rounded half-to-even to cents. The
    /// difference between `amount` and `count * base` is then spread one cent
    /// at a time over the first participants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `count` is zero, the amount is not a
    /// positive cent amount, or the shares overflow.
    pub fn split_equal(amount: Decimal, count: usize) -> Result<Vec<Decimal>, SplitError> {
        if count == 0 {
            return Err(SplitError::InvalidInput(
                "Number of participants must be positive".to_string(),
            ));
        }
        validate_total(amount)?;

        let count_dec = Decimal::from(count);
        let base = round_money(amount / count_dec);
        let mut splits = vec![base; count];

        let diff = amount - base.checked_mul(count_dec).ok_or_else(overflow)?;
        if !diff.is_zero() {
            let adjustment = if diff.is_sign_positive() { CENT } else { -CENT };
            let adjustments = (diff.abs() / CENT).round().to_u64().unwrap_or(0);
            let adjustments = usize::try_from(adjustments).unwrap_or(0);

            for split in splits.iter_mut().take(adjustments) {
                *split += adjustment;
            }
        }

        Ok(splits)
    }

    /// Validate caller-supplied split amounts.
    ///
    /// The amounts are returned unchanged; this is a validation pass.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the total is not a positive cent amount, or the
    ///   amounts are too large to add up
    /// - `SplitMismatch` if the amounts do not sum exactly to the total
    /// - `NegativeAmount` if any amount is negative
    pub fn split_custom(amount: Decimal, custom_amounts: &[Decimal]) -> Result<Vec<Decimal>, SplitError> {
        validate_total(amount)?;

        let sum = checked_sum(custom_amounts.iter().copied()).ok_or_else(overflow)?;
        if sum != amount {
            return Err(SplitError::SplitMismatch {
                sum,
                difference: amount.checked_sub(sum).ok_or_else(overflow)?,
            });
        }

        if let Some(negative) = custom_amounts.iter().find(|a| **a < Decimal::ZERO) {
            return Err(SplitError::NegativeAmount(*negative));
        }

        Ok(custom_amounts.to_vec())
    }

    /// Split an amount by percentages.
    ///
    /// Each share is `amount * pct / 100` rounded half-to-even to cents. Any
    /// remainder is added in full to the largest share, the earliest one on
    /// ties. That share may end up below its proportional value.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the total is not a positive cent amount, or the
    ///   amounts are too large to add up
    /// - `PercentageMismatch` if the percentages are not within 0.01 of 100
    /// - `NegativeAmount` if any percentage is negative
    pub fn split_percentage(amount: Decimal, percentages: &[Decimal]) -> Result<Vec<Decimal>, SplitError> {
        validate_total(amount)?;

        let sum = checked_sum(percentages.iter().copied()).ok_or_else(overflow)?;
        if (sum - Decimal::ONE_HUNDRED).abs() > PERCENTAGE_TOLERANCE {
            return Err(SplitError::PercentageMismatch { sum });
        }

        let mut splits = Vec::with_capacity(percentages.len());
        for pct in percentages {
            if *pct < Decimal::ZERO {
                return Err(SplitError::NegativeAmount(*pct));
            }
            let share = amount.checked_mul(*pct).ok_or_else(overflow)? / Decimal::ONE_HUNDRED;
            splits.push(round_money(share));
        }

        let diff = amount - checked_sum(splits.iter().copied()).ok_or_else(overflow)?;
        if !diff.is_zero() {
            let max_idx = largest_index(&splits);
            splits[max_idx] += diff;
        }

        Ok(splits)
    }
}

/// The split total must be a positive amount with cent precision.
fn validate_total(amount: Decimal) -> Result<(), SplitError> {
    if amount <= Decimal::ZERO {
        return Err(SplitError::InvalidInput(format!(
            "Amount must be positive, got {amount}"
        )));
    }
    if !has_money_precision(amount) {
        return Err(SplitError::InvalidInput(format!(
            "Amount must not have more than two decimal places, got {amount}"
        )));
    }
    Ok(())
}

fn overflow() -> SplitError {
    SplitError::InvalidInput("Amount is too large to split".to_string())
}

/// Index of the largest value, earliest wins on ties. Empty input yields 0.
fn largest_index(values: &[Decimal]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |best, (idx, value)| {
            if *value > values[best] { idx } else { best }
        })
}
