//! Room availability checks
//!
//! A candidate stay competes with every existing reservation of the same room
//! type whose half-open stay `[check_in, check_out)` intersects its own. The
//! rooms of all such reservations count as occupied for the whole candidate
//! stay. This is a linear scan over the reservation set, which is the scaling
//! limit of the ledger.

use chrono::NaiveDate;

use crate::app::catalog::RoomCatalog;
use crate::app::models::{RoomType, ValidatedBooking};
use crate::app::repository::ReservationSet;
use crate::errors::ReservationResult;

/// Rooms of a type held by reservations overlapping `[check_in, check_out)`
pub fn occupied_rooms(
    room_type: RoomType,
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &ReservationSet,
) -> u64 {
    existing
        .iter()
        .filter(|r| r.room_type == room_type && r.overlaps(check_in, check_out))
        .map(|r| u64::from(r.room_count))
        .sum()
}

/// Rooms of a type still free for `[check_in, check_out)`
///
/// Can be negative when the data file holds more bookings than the
/// configured inventory (for example after the catalog shrank).
pub fn available_rooms(
    room_type: RoomType,
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &ReservationSet,
    catalog: &RoomCatalog,
) -> ReservationResult<i64> {
    let capacity = i64::from(catalog.capacity(room_type)?);
    let occupied = occupied_rooms(room_type, check_in, check_out, existing);
    Ok(capacity - i64::try_from(occupied).unwrap_or(i64::MAX))
}

/// Whether the candidate fits in the remaining inventory
pub fn is_available(
    candidate: &ValidatedBooking,
    existing: &ReservationSet,
    catalog: &RoomCatalog,
) -> ReservationResult<bool> {
    let available = available_rooms(
        candidate.room_type,
        candidate.check_in,
        candidate.check_out,
        existing,
        catalog,
    )?;
    Ok(available >= i64::from(candidate.room_count))
}
