//! Cancellation policy
//!
//! A reservation can be cancelled until its departure day begins. Departure
//! dates carry no time of day, so they are taken at midnight when compared
//! with the current moment.

use chrono::{NaiveDateTime, NaiveTime};

use crate::app::models::Reservation;
use crate::errors::{ReservationError, ReservationResult};

/// Whether the stay is over at `now`
pub fn stay_has_ended(reservation: &Reservation, now: NaiveDateTime) -> bool {
    reservation.check_out.and_time(NaiveTime::MIN) < now
}

/// Ok when the reservation may still be cancelled at `now`
pub fn ensure_cancellable(reservation: &Reservation, now: NaiveDateTime) -> ReservationResult<()> {
    if stay_has_ended(reservation, now) {
        return Err(ReservationError::AlreadyCompleted {
            id: reservation.id,
            check_out: reservation.check_out,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{ReservationId, RoomType};
    use crate::app::money::Money;
    use chrono::NaiveDate;

    fn reservation() -> Reservation {
        Reservation {
            id: ReservationId::new(1001),
            guest_name: "Ana".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            room_type: RoomType::Standard,
            room_count: 1,
            total_price: Money::from_cents(40000),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_future_and_current_stays_are_cancellable() {
        let reservation = reservation();
        assert!(ensure_cancellable(&reservation, at(2024, 12, 20, 9, 0)).is_ok());
        assert!(ensure_cancellable(&reservation, at(2025, 1, 3, 12, 0)).is_ok());
        // Exactly midnight of the departure day is still allowed
        assert!(ensure_cancellable(&reservation, at(2025, 1, 5, 0, 0)).is_ok());
    }

    #[test]
    fn test_ended_stay_is_already_completed() {
        let reservation = reservation();
        for now in [at(2025, 1, 5, 0, 1), at(2025, 1, 6, 8, 0), at(2026, 1, 1, 0, 0)] {
            match ensure_cancellable(&reservation, now) {
                Err(ReservationError::AlreadyCompleted { id, check_out }) => {
                    assert_eq!(id, reservation.id);
                    assert_eq!(check_out, reservation.check_out);
                }
                other => panic!("unexpected result at {}: {:?}", now, other),
            }
        }
    }
}
