//! Property-based tests for the split engine.
//!
//! - Exactness: every successful split sums to the total
//! - Equal fairness: shares differ by at most one cent, adjusted shares first
//! - Custom validation: valid lists pass unchanged, off-by-a-cent lists fail

use proptest::prelude::*;
use rust_decimal::Decimal;

use evenly_shared::types::CENT;

use super::engine::SplitEngine;
use super::error::SplitError;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate participant counts (1 to 100).
fn participant_count() -> impl Strategy<Value = usize> {
    1usize..=100
}

/// Strategy to generate percentages with two decimals that sum to exactly 100.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..10_000, 1..10).prop_map(|weights| {
        let total: u32 = weights.iter().sum();
        // basis points, floor-divided, leftover goes to the last entry
        let mut points: Vec<i64> = weights
            .iter()
            .map(|w| i64::from(*w) * 10_000 / i64::from(total))
            .collect();
        let assigned: i64 = points.iter().sum();
        if let Some(last) = points.last_mut() {
            *last += 10_000 - assigned;
        }
        points.into_iter().map(|p| Decimal::new(p, 2)).collect()
    })
}

/// Strategy to generate a total and a custom split of it into cents.
fn custom_split() -> impl Strategy<Value = (Decimal, Vec<Decimal>)> {
    prop::collection::vec(0i64..1_000_000i64, 1..10)
        .prop_filter("total must be positive", |parts| parts.iter().sum::<i64>() > 0)
        .prop_map(|parts| {
            let total = Decimal::new(parts.iter().sum(), 2);
            let amounts = parts.into_iter().map(|p| Decimal::new(p, 2)).collect();
            (total, amounts)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equal splits sum exactly to the total for 1 to 100 participants.
    #[test]
    fn prop_equal_split_is_exact(
        amount in positive_amount(),
        count in participant_count(),
    ) {
        let splits = SplitEngine::split_equal(amount, count).unwrap();
        prop_assert_eq!(splits.len(), count);
        prop_assert_eq!(splits.iter().copied().sum::<Decimal>(), amount);
    }

    /// Equal shares differ by at most one cent and the adjusted shares come first.
    #[test]
    fn prop_equal_split_is_fair_and_front_loaded(
        amount in positive_amount(),
        count in participant_count(),
    ) {
        let splits = SplitEngine::split_equal(amount, count).unwrap();
        let max = splits.iter().copied().max().unwrap();
        let min = splits.iter().copied().min().unwrap();
        prop_assert!(max - min <= CENT, "spread too wide: {} - {}", max, min);

        let head = splits[0];
        let adjusted = splits.iter().take_while(|s| **s == head).count();
        let tail = splits[count - 1];
        prop_assert!(
            splits[adjusted..].iter().all(|s| *s == tail),
            "adjusted shares are not a prefix: {:?}",
            splits
        );
    }

    /// Equal splits are deterministic.
    #[test]
    fn prop_equal_split_is_deterministic(
        amount in positive_amount(),
        count in participant_count(),
    ) {
        let first = SplitEngine::split_equal(amount, count).unwrap();
        let second = SplitEngine::split_equal(amount, count).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Percentage splits sum exactly to the total.
    #[test]
    fn prop_percentage_split_is_exact(
        amount in positive_amount(),
        percentages in percentages_summing_to_100(),
    ) {
        let splits = SplitEngine::split_percentage(amount, &percentages).unwrap();
        prop_assert_eq!(splits.len(), percentages.len());
        prop_assert_eq!(splits.iter().copied().sum::<Decimal>(), amount);
    }

    /// Valid custom splits come back unchanged.
    #[test]
    fn prop_custom_split_passes_through(
        (total, amounts) in custom_split(),
    ) {
        let result = SplitEngine::split_custom(total, &amounts).unwrap();
        prop_assert_eq!(result, amounts);
    }

    /// A custom split that is a cent off is rejected with the exact difference.
    #[test]
    fn prop_custom_split_off_by_a_cent_is_rejected(
        (total, mut amounts) in custom_split(),
    ) {
        amounts[0] += CENT;
        let err = SplitEngine::split_custom(total, &amounts).unwrap_err();
        prop_assert_eq!(
            err,
            SplitError::SplitMismatch {
                sum: total + CENT,
                difference: -CENT,
            }
        );
    }
}
