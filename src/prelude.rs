//! Prelude module for Hotel Ledger Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use hotel_ledger::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use hotel_ledger::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let store = JsonFileStore::new(config.data_file(None));
//!     let ledger = Ledger::open(config.to_catalog()?, store).await?;
//!
//!     println!("{} active reservations", ledger.reservations().len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, ReservationError, Result, StorageError};

// Essential app components
pub use crate::app::{
    // Data types
    BookingRequest,
    // Orchestration
    JsonFileStore,
    Ledger,
    Money,
    Reservation,
    ReservationId,
    ReservationSet,
    ReservationStore,
    RoomAvailability,
    RoomCatalog,
    RoomSpec,
    RoomType,
    Statistics,
};

// Configuration
pub use crate::config::AppConfig;

// Common external crate re-exports for convenience
pub use chrono::{NaiveDate, NaiveDateTime};
pub use std::path::{Path, PathBuf};
pub use tokio;
