//! Data models for Hotel Ledger
//!
//! This module defines the core data structures used throughout the application:
//! room types, reservation identifiers, reservations and booking requests.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::money::Money;
use crate::errors::ReservationError;

/// Room types offered by the hotel
///
/// The set is closed: every catalog must price and count all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Standard room
    Standard,
    /// Premium room
    Premium,
    /// Luxury suite
    Luxury,
}

impl RoomType {
    /// Every room type, in display order
    pub const ALL: [RoomType; 3] = [RoomType::Standard, RoomType::Premium, RoomType::Luxury];

    /// Lower-case name used in input, config and the data file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Luxury => "luxury",
        }
    }

    /// Comma separated list of accepted names, for prompts
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(RoomType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ReservationError;

    /// Case-insensitive parse, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "luxury" => Ok(Self::Luxury),
            _ => Err(ReservationError::UnknownRoomType {
                value: s.trim().to_string(),
            }),
        }
    }
}

/// Guest-facing reservation reference code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(u64);

impl ReservationId {
    /// Wrap a raw reference code
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw reference code
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One accepted booking
///
/// Reservations are never edited after creation; the repository hands out
/// shared references only and the sole way to change one is to cancel it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reference code
    pub id: ReservationId,
    /// Responsible guest, canonical capitalization
    pub guest_name: String,
    /// First night
    pub check_in: NaiveDate,
    /// Departure day, strictly after `check_in`
    pub check_out: NaiveDate,
    /// Booked room type
    pub room_type: RoomType,
    /// Number of rooms of `room_type`
    pub room_count: u32,
    /// `nightly_rate × nights × room_count`, fixed at creation
    pub total_price: Money,
}

impl Reservation {
    /// Length of stay in nights
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether `[check_in, check_out)` intersects this reservation's stay
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        check_in < self.check_out && check_out > self.check_in
    }
}

/// A booking request as collected by the I/O layer
///
/// Fields are unchecked here; the core re-validates them and reports
/// every problem it finds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Responsible guest, any capitalization
    pub guest_name: String,
    /// First night
    pub check_in: NaiveDate,
    /// Departure day
    pub check_out: NaiveDate,
    /// Room type name as typed
    pub room_type: String,
    /// Requested number of rooms
    pub room_count: i64,
}

/// A booking request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    /// Canonical guest name
    pub guest_name: String,
    /// First night
    pub check_in: NaiveDate,
    /// Departure day, strictly after `check_in`
    pub check_out: NaiveDate,
    /// Requested room type
    pub room_type: RoomType,
    /// Requested number of rooms, at least one
    pub room_count: u32,
}

impl ValidatedBooking {
    /// Length of stay in nights
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}
