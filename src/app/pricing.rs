//! Stay pricing

use crate::app::catalog::RoomCatalog;
use crate::app::models::ValidatedBooking;
use crate::app::money::Money;
use crate::errors::{ReservationError, ReservationResult};

/// `nightly_rate × nights × rooms`, `None` when the product overflows
pub fn stay_price(nightly_rate: Money, nights: i64, room_count: u32) -> Option<Money> {
    nightly_rate
        .checked_mul(nights)?
        .checked_mul(i64::from(room_count))
}

/// Total price of a validated booking at catalog rates
pub fn quote(booking: &ValidatedBooking, catalog: &RoomCatalog) -> ReservationResult<Money> {
    let rate = catalog.rate(booking.room_type)?;
    stay_price(rate, booking.nights(), booking.room_count).ok_or(ReservationError::AmountOverflow)
}
