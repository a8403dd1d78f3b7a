//! Core expense-sharing logic for Evenly.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every routine is a deterministic function of its inputs and performs no I/O.
//!
//! # Modules
//!
//! - `split` - Exact-cent splitting of an expense among participants
//! - `balance` - Net balance aggregation and the zero-sum check
//! - `settlement` - Greedy debt simplification
//! - `ledger` - Input validation and report assembly

pub mod balance;
pub mod ledger;
pub mod settlement;
pub mod split;

pub use evenly_shared::types::ParticipantId;
