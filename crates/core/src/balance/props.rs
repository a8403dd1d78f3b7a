//! Property-based tests for balance aggregation.
//!
//! - Zero-sum: balances folded from engine-produced records sum to exactly zero
//! - Order independence: reversing the records yields the same balances
//! - Determinism: folding twice yields identical maps

use proptest::prelude::*;
use rust_decimal::Decimal;

use evenly_shared::types::ParticipantId;

use super::aggregator::calculate_balances;
use super::invariant::{balance_sum, is_zero_sum};
use super::types::{ExpenseRecord, SettlementRecord};
use crate::split::{SplitEngine, SplitRequest};

const MEMBERS: usize = 6;

fn member(idx: usize) -> ParticipantId {
    ParticipantId::new(format!("member-{}", idx % MEMBERS))
}

/// Strategy for an expense: payer, amount in cents, and a non-empty member mask.
fn expense_strategy() -> impl Strategy<Value = ExpenseRecord> {
    (0..MEMBERS, 1i64..10_000_000, 1u8..64).prop_map(|(payer, cents, mask)| {
        let participants: Vec<ParticipantId> = (0..MEMBERS)
            .filter(|bit| mask & (1 << bit) != 0)
            .map(member)
            .collect();
        let amount = Decimal::new(cents, 2);
        let allocation = SplitEngine::create_splits(&SplitRequest::equal(amount, participants))
            .expect("equal split of a positive amount");
        ExpenseRecord::from_allocation(member(payer), amount, allocation)
    })
}

/// Strategy for a settlement between two distinct members.
fn settlement_strategy() -> impl Strategy<Value = SettlementRecord> {
    (0..MEMBERS, 1..MEMBERS, 1i64..1_000_000).prop_map(|(payer, offset, cents)| {
        SettlementRecord::new(member(payer), member(payer + offset), Decimal::new(cents, 2))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Balances built from well-formed records always sum to zero.
    #[test]
    fn prop_balances_sum_to_zero(
        expenses in prop::collection::vec(expense_strategy(), 0..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let balances = calculate_balances(&expenses, &settlements).unwrap();
        prop_assert_eq!(balance_sum(&balances), Some(Decimal::ZERO));
        prop_assert!(is_zero_sum(&balances));
    }

    /// Record order does not change any participant's balance.
    #[test]
    fn prop_balances_are_order_independent(
        expenses in prop::collection::vec(expense_strategy(), 0..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let forward = calculate_balances(&expenses, &settlements).unwrap();

        let mut rev_expenses = expenses.clone();
        rev_expenses.reverse();
        let mut rev_settlements = settlements.clone();
        rev_settlements.reverse();
        let backward = calculate_balances(&rev_expenses, &rev_settlements).unwrap();

        prop_assert_eq!(forward.len(), backward.len());
        for (participant, balance) in &forward {
            prop_assert_eq!(Some(balance), backward.get(participant));
        }
    }

    /// Folding the same records twice gives identical maps, key order included.
    #[test]
    fn prop_balances_are_deterministic(
        expenses in prop::collection::vec(expense_strategy(), 0..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let first = calculate_balances(&expenses, &settlements).unwrap();
        let second = calculate_balances(&expenses, &settlements).unwrap();
        let first_keys: Vec<_> = first.keys().collect();
        let second_keys: Vec<_> = second.keys().collect();
        prop_assert_eq!(first_keys, second_keys);
        prop_assert_eq!(first, second);
    }
}
