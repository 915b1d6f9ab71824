//! Ledger statistics
//!
//! Folds the reservation set into summary figures in a single pass.

use std::collections::BTreeMap;

use crate::app::models::{Reservation, RoomType};
use crate::app::money::Money;
use crate::app::repository::ReservationSet;
use crate::errors::{ReservationError, ReservationResult};

/// Summary of all active reservations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// Number of active reservations
    pub count: usize,
    /// Sum of every reservation's total price
    pub total_revenue: Money,
    /// Highest total price; the earliest booking wins ties
    pub most_expensive: Reservation,
    /// Most nights; the earliest booking wins ties
    pub longest_stay: Reservation,
    /// Rooms booked per type, every type present even at zero
    pub rooms_booked_by_type: BTreeMap<RoomType, u64>,
}

impl Statistics {
    /// Rooms booked across all types
    pub fn total_rooms_booked(&self) -> u64 {
        self.rooms_booked_by_type.values().sum()
    }

    /// Mean price per reservation, rounded down to the cent
    pub fn average_price(&self) -> Money {
        Money::from_cents(self.total_revenue.cents() / self.count as i64)
    }
}

/// Compute statistics, or `ReservationError::Empty` when there is nothing to summarize
///
/// Fails with `AmountOverflow` when the revenue total does not fit in `Money`.
pub fn aggregate(existing: &ReservationSet) -> ReservationResult<Statistics> {
    let first = existing.iter().next().ok_or(ReservationError::Empty)?;

    let mut rooms_booked_by_type: BTreeMap<RoomType, u64> =
        RoomType::ALL.iter().map(|room_type| (*room_type, 0)).collect();
    let mut count = 0usize;
    let mut total_revenue = Money::zero();
    let mut most_expensive = first;
    let mut longest_stay = first;

    for reservation in existing {
        count += 1;
        total_revenue = total_revenue
            .checked_add(reservation.total_price)
            .ok_or(ReservationError::AmountOverflow)?;

        if reservation.total_price > most_expensive.total_price {
            most_expensive = reservation;
        }
        if reservation.nights() > longest_stay.nights() {
            longest_stay = reservation;
        }

        *rooms_booked_by_type.entry(reservation.room_type).or_insert(0) +=
            u64::from(reservation.room_count);
    }

    Ok(Statistics {
        count,
        total_revenue,
        most_expensive: most_expensive.clone(),
        longest_stay: longest_stay.clone(),
        rooms_booked_by_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ReservationId;
    use chrono::NaiveDate;

    fn reservation(id: u64, room_type: RoomType, rooms: u32, nights: i64, price: i64) -> Reservation {
        let check_in = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        Reservation {
            id: ReservationId::new(id),
            guest_name: format!("Guest{}", id),
            check_in,
            check_out: check_in + chrono::Duration::days(nights),
            room_type,
            room_count: rooms,
            total_price: Money::from_cents(price),
        }
    }

    #[test]
    fn test_empty_set_reports_empty() {
        assert!(matches!(
            aggregate(&ReservationSet::new()),
            Err(ReservationError::Empty)
        ));
    }

    #[test]
    fn test_single_reservation_is_both_extremes() {
        let mut set = ReservationSet::new();
        set.append(reservation(1001, RoomType::Premium, 2, 3, 108000));

        let stats = aggregate(&set).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.total_revenue, Money::from_cents(108000));
        assert_eq!(stats.most_expensive.id, ReservationId::new(1001));
        assert_eq!(stats.longest_stay.id, ReservationId::new(1001));
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Premium], 2);
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Standard], 0);
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Luxury], 0);
    }

    #[test]
    fn test_aggregate_figures() {
        let mut set = ReservationSet::new();
        set.append(reservation(1001, RoomType::Standard, 3, 2, 60000));
        set.append(reservation(1002, RoomType::Luxury, 1, 7, 175000));
        set.append(reservation(1003, RoomType::Standard, 1, 4, 40000));

        let stats = aggregate(&set).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_revenue, Money::from_cents(275000));
        assert_eq!(stats.most_expensive.id.value(), 1002);
        assert_eq!(stats.longest_stay.id.value(), 1002);
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Standard], 4);
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Luxury], 1);
        assert_eq!(stats.rooms_booked_by_type[&RoomType::Premium], 0);
        assert_eq!(stats.total_rooms_booked(), 5);
        assert_eq!(stats.average_price(), Money::from_cents(91666));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let mut set = ReservationSet::new();
        set.append(reservation(1001, RoomType::Standard, 1, 5, 50000));
        set.append(reservation(1002, RoomType::Premium, 1, 5, 50000));
        set.append(reservation(1003, RoomType::Luxury, 1, 2, 50000));

        let stats = aggregate(&set).unwrap();
        assert_eq!(stats.most_expensive.id.value(), 1001);
        assert_eq!(stats.longest_stay.id.value(), 1001);
    }

    #[test]
    fn test_revenue_overflow_is_reported() {
        let mut set = ReservationSet::new();
        set.append(reservation(1001, RoomType::Luxury, 1, 3, i64::MAX / 2 + 1));
        set.append(reservation(1002, RoomType::Luxury, 1, 3, i64::MAX / 2 + 1));

        assert!(matches!(
            aggregate(&set),
            Err(ReservationError::AmountOverflow)
        ));
    }
}
