//! Screen rendering for the hotel ledger
//!
//! All functions return strings; callers decide where they are written.

use crate::app::{Money, Reservation, RoomAvailability, RoomType, Statistics};
use crate::config::HotelConfig;
use crate::constants::display;
use crate::errors::ReservationError;

/// Renders ledger data with the hotel's name and currency
#[derive(Debug, Clone)]
pub struct Presenter {
    hotel_name: String,
    currency_symbol: String,
}

impl Presenter {
    /// Presenter for a configured hotel
    pub fn new(hotel: &HotelConfig) -> Self {
        Self {
            hotel_name: hotel.name.clone(),
            currency_symbol: hotel.currency_symbol.clone(),
        }
    }

    /// `R$ 1,234.56`
    pub fn money(&self, amount: Money) -> String {
        format!("{} {}", self.currency_symbol, group_thousands(amount))
    }

    /// Title between two rules
    pub fn heading(&self, title: &str) -> String {
        let rule = "=".repeat(display::BANNER_WIDTH);
        format!("{}\n{}\n{}", rule, title, rule)
    }

    /// Welcome banner
    pub fn banner(&self) -> String {
        let rule = "=".repeat(display::BANNER_WIDTH);
        format!(
            "{}\nWELCOME TO THE RESERVATION SYSTEM\n{}\n{}",
            rule,
            self.hotel_name.to_uppercase(),
            rule
        )
    }

    /// Main menu
    pub fn menu(&self) -> String {
        format!(
            "{}\n\
             1 - New reservation\n\
             2 - Find reservations by guest\n\
             3 - List all reservations\n\
             4 - Cancel a reservation\n\
             5 - Statistics\n\
             6 - Exit",
            self.heading("MAIN MENU")
        )
    }

    /// Goodbye message
    pub fn farewell(&self) -> String {
        self.heading(&format!(
            "CLOSING THE SYSTEM\nThank you for choosing {}!",
            self.hotel_name
        ))
    }

    /// Full reservation card
    pub fn reservation(&self, reservation: &Reservation) -> String {
        format!(
            "Reservation code: {}\n\
             Guest: {}\n\
             Period: {} to {} ({} nights)\n\
             Room type: {}\n\
             Rooms: {}\n\
             Total: {}",
            reservation.id,
            reservation.guest_name,
            reservation.check_in.format(display::DATE_FORMAT),
            reservation.check_out.format(display::DATE_FORMAT),
            reservation.nights(),
            reservation.room_type,
            reservation.room_count,
            self.money(reservation.total_price)
        )
    }

    /// Several reservation cards separated by rules
    pub fn reservation_list(&self, reservations: &[&Reservation]) -> String {
        let separator = format!("\n{}\n", "-".repeat(display::BANNER_WIDTH));
        reservations
            .iter()
            .map(|reservation| self.reservation(reservation))
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// Confirmation after a successful booking
    pub fn booking_confirmation(&self, reservation: &Reservation) -> String {
        format!(
            "{}\n{}",
            self.heading("✅ RESERVATION CONFIRMED"),
            self.reservation(reservation)
        )
    }

    /// Confirmation after a cancellation
    pub fn cancellation_confirmation(&self, reservation: &Reservation) -> String {
        format!(
            "{}\nCode: {}\nGuest: {}",
            self.heading("✅ RESERVATION CANCELLED"),
            reservation.id,
            reservation.guest_name
        )
    }

    /// Explain why an operation was refused and what the user can try instead
    pub fn rejection(&self, error: &ReservationError) -> String {
        match error {
            ReservationError::CapacityExceeded {
                room_type,
                requested,
                available,
            } => format!(
                "{}\nOnly {} {} room(s) are free for that period, {} requested.\n\
                 Suggestions:\n  \
                 - Choose another room type\n  \
                 - Reduce the number of rooms\n  \
                 - Change the reservation dates",
                self.heading("❌ THIS RESERVATION CANNOT BE MADE"),
                available,
                room_type,
                requested
            ),
            ReservationError::AlreadyCompleted { check_out, .. } => format!(
                "{}\nThe stay ended on {}.",
                self.heading("❌ THIS RESERVATION CANNOT BE CANCELLED"),
                check_out.format(display::DATE_FORMAT)
            ),
            ReservationError::Persistence(_) => {
                format!("❌ {}\nNothing was changed. Please try again.", error)
            }
            other => format!("❌ {}", other),
        }
    }

    /// Statistics screen
    pub fn statistics(&self, stats: &Statistics) -> String {
        let mut lines = vec![
            self.heading("📊 STATISTICS"),
            format!("Active reservations: {}", stats.count),
            format!("Total revenue: {}", self.money(stats.total_revenue)),
            format!("Average per reservation: {}", self.money(stats.average_price())),
            format!(
                "Most expensive: {} ({}, {})",
                stats.most_expensive.id,
                stats.most_expensive.guest_name,
                self.money(stats.most_expensive.total_price)
            ),
            format!(
                "Longest stay: {} ({}, {} nights)",
                stats.longest_stay.id,
                stats.longest_stay.guest_name,
                stats.longest_stay.nights()
            ),
            format!("Rooms booked: {}", stats.total_rooms_booked()),
        ];
        lines.extend(
            stats
                .rooms_booked_by_type
                .iter()
                .map(|(room_type, rooms)| format!("  {:<10} {}", room_type.as_str(), rooms)),
        );
        lines.join("\n")
    }

    /// Free rooms per type for a period
    pub fn availability(&self, report: &[RoomAvailability]) -> String {
        let mut lines = vec![format!(
            "{:<10} {:>6} {:>6} {:>16}",
            "Type", "Free", "Total", "Nightly rate"
        )];
        lines.extend(report.iter().map(|entry| {
            format!(
                "{:<10} {:>6} {:>6} {:>16}",
                entry.room_type.as_str(),
                entry.available.max(0),
                entry.spec.count,
                self.money(entry.spec.nightly_rate)
            )
        }));
        lines.join("\n")
    }

    /// Room types with their rates, shown before booking
    pub fn rates(&self, rates: impl IntoIterator<Item = (RoomType, Money)>) -> String {
        rates
            .into_iter()
            .map(|(room_type, rate)| format!("  {:<10} {} / night", room_type.as_str(), self.money(rate)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `123456789` cents as `1,234,567.89`
fn group_thousands(amount: Money) -> String {
    let digits = amount.major().unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.cents() < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, amount.minor())
}
