//! Reservation reference codes
//!
//! Codes are issued in increasing order and never reused, even after a
//! cancellation: the repository remembers the highest code it has handed out
//! and that mark is persisted together with the reservations. Codes do not
//! depend on a reservation's content, so two identical bookings still get
//! distinct codes.

use crate::app::models::ReservationId;
use crate::app::repository::ReservationSet;
use crate::constants::ids::FIRST_RESERVATION_ID;

/// Next free reference code for a reservation set
///
/// The store refuses data holding `u64::MAX`, so a successor always exists.
pub fn generate_id(existing: &ReservationSet) -> ReservationId {
    let highest = existing
        .iter()
        .map(|r| r.id)
        .chain(existing.last_issued_id())
        .max();

    match highest {
        Some(id) => ReservationId::new(id.value().saturating_add(1).max(FIRST_RESERVATION_ID)),
        None => ReservationId::new(FIRST_RESERVATION_ID),
    }
}
