//! Shared types, errors, and configuration for Evenly.
//!
//! This crate provides common types used across all other crates:
//! - Participant and record identifiers
//! - Fixed-point money helpers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LedgerConfig, LogConfig};
pub use error::{AppError, AppResult};
