//! Core application logic for Hotel Ledger
//!
//! This module contains the reservation engine: the room catalog, request
//! validation, availability and pricing rules, the in-memory reservation set,
//! persistence, and the [`Ledger`] that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use hotel_ledger::app::{BookingRequest, JsonFileStore, Ledger, RoomCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("reservations.json");
//! let mut ledger = Ledger::open(RoomCatalog::default(), store).await?;
//!
//! let reservation = ledger
//!     .book(BookingRequest {
//!         guest_name: "ana souza".to_string(),
//!         check_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!         check_out: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
//!         room_type: "standard".to_string(),
//!         room_count: 2,
//!     })
//!     .await?;
//! println!("Booked {} for {}", reservation.id, reservation.total_price);
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod cancellation;
pub mod catalog;
pub mod identifier;
pub mod ledger;
pub mod models;
pub mod money;
pub mod pricing;
pub mod repository;
pub mod stats;
pub mod storage;
pub mod validation;

// Re-export main public API
pub use availability::{available_rooms, is_available, occupied_rooms};
pub use cancellation::{ensure_cancellable, stay_has_ended};
pub use catalog::{RoomCatalog, RoomSpec};
pub use identifier::generate_id;
pub use ledger::{Ledger, RoomAvailability};
pub use models::{BookingRequest, Reservation, ReservationId, RoomType, ValidatedBooking};
pub use money::{Money, ParseMoneyError};
pub use pricing::{quote, stay_price};
pub use repository::ReservationSet;
pub use stats::{Statistics, aggregate};
pub use storage::{JsonFileStore, ReservationStore};
pub use validation::{normalize_guest_name, validate_request};
