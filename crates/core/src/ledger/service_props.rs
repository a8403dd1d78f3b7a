//! Property-based tests for the ledger service.
//!
//! - Recorded expenses conserve their amount across split lines
//! - The participant cap is enforced exactly at its boundary
//! - Balance reports over recorded data always pass the zero-sum check
//! - Simplify reports settle every balance

use proptest::prelude::*;
use rust_decimal::Decimal;

use evenly_shared::types::ParticipantId;

use super::service::LedgerService;
use super::types::NewExpense;
use crate::balance::calculate_balances;
use crate::settlement::apply_instructions;
use crate::split::SplitRequest;

fn members(count: usize) -> Vec<ParticipantId> {
    (0..count).map(|idx| ParticipantId::new(format!("p{idx}"))).collect()
}

fn draft_strategy() -> impl Strategy<Value = NewExpense> {
    (1usize..=4, 0usize..4, 1i64..5_000_000).prop_map(|(count, payer, cents)| {
        NewExpense::new(
            ParticipantId::new(format!("p{}", payer % count)),
            SplitRequest::equal(Decimal::new(cents, 2), members(count)),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Split lines of a recorded expense sum to its amount.
    #[test]
    fn prop_recorded_expense_conserves_amount(draft in draft_strategy()) {
        let record = LedgerService::default().record_expense(&draft).unwrap();
        prop_assert_eq!(record.split_total(), Some(record.amount));
        prop_assert_eq!(record.splits.len(), draft.participants().len());
    }

    /// Expenses are accepted up to the cap and rejected past it.
    #[test]
    fn prop_participant_cap_boundary(cap in 1usize..8, count in 1usize..12) {
        let service = LedgerService::default().with_max_participants(Some(cap));
        let draft = NewExpense::new("p0", SplitRequest::equal(Decimal::new(10_000, 2), members(count)));

        let result = service.record_expense(&draft);

        prop_assert_eq!(result.is_ok(), count <= cap);
    }

    /// Reports over recorded expenses are zero-sum and fully settled by
    /// their own instructions.
    #[test]
    fn prop_reports_settle_recorded_ledgers(
        drafts in prop::collection::vec(draft_strategy(), 1..15),
    ) {
        let service = LedgerService::default();
        let expenses: Vec<_> = drafts
            .iter()
            .map(|draft| service.record_expense(draft).unwrap())
            .collect();

        let report = service.balances(None, &expenses, &[]).unwrap();
        prop_assert!(report.is_zero_sum);

        let simplified = service.simplify(None, &expenses, &[]).unwrap();
        let balances = calculate_balances(&expenses, &[]).unwrap();
        let residual = apply_instructions(&balances, &simplified.transactions).unwrap();
        for balance in residual.values() {
            prop_assert!(balance.abs() <= service.tolerance());
        }
    }
}
