//! Hotel Ledger Library
//!
//! A Rust library for running the reservation book of a small hotel.
//! Validates booking requests, enforces room inventory over overlapping stays,
//! prices stays and keeps the reservation set safely persisted.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
