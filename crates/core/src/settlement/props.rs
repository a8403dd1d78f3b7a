//! Property-based tests for debt simplification.
//!
//! - Exactness: on cent-exact zero-sum balances every residual is zero
//! - Bound: at most `debtors + creditors - 1` instructions
//! - Direction: money only flows from debtors to creditors, in positive amounts
//! - Volume: the total transferred equals the smaller side's outstanding total

use proptest::prelude::*;
use rust_decimal::Decimal;

use evenly_shared::types::{CENT, ParticipantId};

use super::simplifier::{apply_instructions, simplify, simplify_debts};
use crate::balance::{BalanceMap, DEFAULT_TOLERANCE, calculate_balances, ExpenseRecord};
use crate::split::{SplitEngine, SplitRequest};

fn participant(idx: usize) -> ParticipantId {
    ParticipantId::new(format!("p{idx}"))
}

/// Strategy for arbitrary cent balances (not necessarily zero-sum).
fn arbitrary_balances() -> impl Strategy<Value = BalanceMap> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 0..12).prop_map(|cents| {
        cents
            .into_iter()
            .enumerate()
            .map(|(idx, c)| (participant(idx), Decimal::new(c, 2)))
            .collect()
    })
}

/// Strategy for zero-sum cent balances where every non-zero magnitude
/// exceeds the default tolerance.
fn zero_sum_balances() -> impl Strategy<Value = BalanceMap> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 1..12)
        .prop_map(|cents| {
            let mut cents: Vec<i64> = cents.into_iter().filter(|c| c.abs() > 1).collect();
            let closing = -cents.iter().sum::<i64>();
            cents.push(closing);
            cents
        })
        .prop_filter("closing balance must clear the tolerance", |cents| {
            cents.last().is_some_and(|c| c.abs() != 1)
        })
        .prop_map(|cents| {
            cents
                .into_iter()
                .enumerate()
                .map(|(idx, c)| (participant(idx), Decimal::new(c, 2)))
                .collect()
        })
}

fn side_totals(balances: &BalanceMap) -> (usize, usize, Decimal, Decimal) {
    let debts: Vec<Decimal> = balances
        .values()
        .filter(|b| **b < -DEFAULT_TOLERANCE)
        .map(|b| b.abs())
        .collect();
    let credits: Vec<Decimal> = balances
        .values()
        .filter(|b| **b > DEFAULT_TOLERANCE)
        .copied()
        .collect();
    (
        debts.len(),
        credits.len(),
        debts.iter().copied().sum(),
        credits.iter().copied().sum(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying the instructions zeroes every balance exactly.
    #[test]
    fn prop_instructions_clear_zero_sum_balances(balances in zero_sum_balances()) {
        let instructions = simplify(&balances);
        for (participant, residual) in apply_instructions(&balances, &instructions).unwrap() {
            prop_assert_eq!(residual, Decimal::ZERO, "{} not cleared", participant);
        }
    }

    /// Instruction count never exceeds debtors + creditors - 1.
    #[test]
    fn prop_instruction_count_is_bounded(balances in arbitrary_balances()) {
        let instructions = simplify(&balances);
        let (debtors, creditors, _, _) = side_totals(&balances);
        if debtors == 0 || creditors == 0 {
            prop_assert!(instructions.is_empty());
        } else {
            prop_assert!(instructions.len() <= debtors + creditors - 1);
        }
    }

    /// Transfers go from a debtor to a creditor and are strictly positive.
    #[test]
    fn prop_instructions_flow_from_debtors_to_creditors(balances in arbitrary_balances()) {
        for instruction in simplify(&balances) {
            prop_assert!(instruction.amount > Decimal::ZERO);
            prop_assert!(balances[&instruction.from] < -DEFAULT_TOLERANCE);
            prop_assert!(balances[&instruction.to] > DEFAULT_TOLERANCE);
        }
    }

    /// The volume moved equals the smaller of total debt and total credit.
    #[test]
    fn prop_transfer_volume_matches_smaller_side(balances in arbitrary_balances()) {
        let (_, _, debt, credit) = side_totals(&balances);
        let moved: Decimal = simplify(&balances).iter().map(|i| i.amount).sum();
        prop_assert_eq!(moved, debt.min(credit));
    }

    /// Simplification is deterministic and leaves its input untouched.
    #[test]
    fn prop_simplify_is_pure(balances in arbitrary_balances()) {
        let before = balances.clone();
        let first = simplify(&balances);
        let second = simplify(&balances);
        prop_assert_eq!(first, second);
        prop_assert_eq!(balances, before);
    }

    /// Ledger-produced balances settle to within a cent per participant left
    /// out as already settled.
    #[test]
    fn prop_ledger_balances_settle(
        amounts in prop::collection::vec(1i64..1_000_000, 1..10),
        payers in prop::collection::vec(0usize..4, 1..10),
    ) {
        let members: Vec<ParticipantId> = (0..4).map(participant).collect();
        let expenses: Vec<ExpenseRecord> = amounts
            .iter()
            .zip(payers.iter().cycle())
            .map(|(cents, payer)| {
                let amount = Decimal::new(*cents, 2);
                let allocation = SplitEngine::create_splits(
                    &SplitRequest::equal(amount, members.clone()),
                )
                .expect("equal split of a positive amount");
                ExpenseRecord::from_allocation(members[*payer].clone(), amount, allocation)
            })
            .collect();

        let balances = calculate_balances(&expenses, &[]).unwrap();
        let skipped = balances.values().filter(|b| b.abs() <= DEFAULT_TOLERANCE).count();
        let slack = CENT * Decimal::from(skipped.max(1));

        let residual = apply_instructions(&balances, &simplify_debts(&balances, DEFAULT_TOLERANCE)).unwrap();
        for (participant, remaining) in residual {
            prop_assert!(remaining.abs() <= slack, "{} left with {}", participant, remaining);
        }
    }
}
