//! Common types used across the workspace.

pub mod id;
pub mod money;


pub use id::*;
pub use money::{CENT, MONEY_SCALE, checked_sum, has_money_precision, round_money};
