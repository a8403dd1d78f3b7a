//! Turning net balances into repayment transfers.

pub mod simplifier;

#[cfg(test)]
mod props;

pub use simplifier::{SettlementInstruction, apply_instructions, simplify, simplify_debts};
