//! Room catalog: capacity and nightly rate per room type
//!
//! Loaded once at startup from configuration and read-only afterwards.

use std::collections::BTreeMap;

use crate::app::models::RoomType;
use crate::app::money::Money;
use crate::constants::rooms;
use crate::errors::{ReservationError, ReservationResult};

/// Inventory and price of one room type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSpec {
    /// Number of rooms of this type in the building
    pub count: u32,
    /// Price of one room for one night
    pub nightly_rate: Money,
}

/// Static lookup table of room types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: BTreeMap<RoomType, RoomSpec>,
}

impl RoomCatalog {
    /// Build a catalog from explicit entries
    ///
    /// Entries are taken as given; configuration loading is responsible for
    /// checking that every type is present with positive values.
    pub fn new(entries: impl IntoIterator<Item = (RoomType, RoomSpec)>) -> Self {
        Self {
            rooms: entries.into_iter().collect(),
        }
    }

    /// Nightly rate of a room type
    pub fn rate(&self, room_type: RoomType) -> ReservationResult<Money> {
        self.spec(room_type).map(|spec| spec.nightly_rate)
    }

    /// Number of rooms of a type
    pub fn capacity(&self, room_type: RoomType) -> ReservationResult<u32> {
        self.spec(room_type).map(|spec| spec.count)
    }

    /// Full entry for a room type
    pub fn spec(&self, room_type: RoomType) -> ReservationResult<RoomSpec> {
        self.rooms
            .get(&room_type)
            .copied()
            .ok_or_else(|| ReservationError::UnknownRoomType {
                value: room_type.to_string(),
            })
    }

    /// Whether the catalog has an entry for the type
    pub fn offers(&self, room_type: RoomType) -> bool {
        self.rooms.contains_key(&room_type)
    }

    /// Iterate entries in room type order
    pub fn iter(&self) -> impl Iterator<Item = (RoomType, RoomSpec)> + '_ {
        self.rooms.iter().map(|(room_type, spec)| (*room_type, *spec))
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        let spec = |count: u32, rate_cents: i64| RoomSpec {
            count,
            nightly_rate: Money::from_cents(rate_cents),
        };

        Self::new([
            (
                RoomType::Standard,
                spec(rooms::STANDARD_COUNT, rooms::STANDARD_RATE_CENTS),
            ),
            (
                RoomType::Premium,
                spec(rooms::PREMIUM_COUNT, rooms::PREMIUM_RATE_CENTS),
            ),
            (
                RoomType::Luxury,
                spec(rooms::LUXURY_COUNT, rooms::LUXURY_RATE_CENTS),
            ),
        ])
    }
}
