//! Exact-cent expense splitting.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{PERCENTAGE_TOLERANCE, SplitEngine};
pub use error::SplitError;
pub use types::{Allocation, SplitLine, SplitPolicy, SplitRequest, SplitRule};
