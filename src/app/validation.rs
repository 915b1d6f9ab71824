//! Booking request validation
//!
//! The I/O layer already re-prompts on bad input, but the core checks every
//! request again before touching the reservation set. All checks run
//! independently and every failing reason is reported, always in the order
//! of [`InvalidReason`]'s variants.

use crate::app::catalog::RoomCatalog;
use crate::app::models::{BookingRequest, RoomType, ValidatedBooking};
use crate::errors::{InvalidReason, ReservationError, ReservationResult};

/// Canonical capitalization of a guest name
///
/// Surrounding whitespace is dropped, the first character is upper-cased and
/// the rest lower-cased (`"  mARIA silva"` becomes `"Maria silva"`).
pub fn normalize_guest_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Check a request and turn it into a typed booking
pub fn validate_request(
    request: &BookingRequest,
    catalog: &RoomCatalog,
) -> ReservationResult<ValidatedBooking> {
    let mut reasons = Vec::new();

    let guest_name = normalize_guest_name(&request.guest_name);
    if guest_name.is_empty() {
        reasons.push(InvalidReason::EmptyGuestName);
    }

    if request.check_out <= request.check_in {
        reasons.push(InvalidReason::NonPositiveStay);
    }

    let room_type = request
        .room_type
        .parse::<RoomType>()
        .ok()
        .filter(|room_type| catalog.offers(*room_type));
    if room_type.is_none() {
        reasons.push(InvalidReason::UnknownRoomType);
    }

    if request.room_count <= 0 {
        reasons.push(InvalidReason::NonPositiveRoomCount);
    }

    match room_type {
        Some(room_type) if reasons.is_empty() => Ok(ValidatedBooking {
            guest_name,
            check_in: request.check_in,
            check_out: request.check_out,
            room_type,
            // Counts beyond u32 can never fit the inventory anyway
            room_count: u32::try_from(request.room_count).unwrap_or(u32::MAX),
        }),
        _ => Err(ReservationError::InvalidRequest { reasons }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> BookingRequest {
        BookingRequest {
            guest_name: "ana souza".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            room_type: "Standard".to_string(),
            room_count: 2,
        }
    }

    #[test]
    fn test_normalize_guest_name() {
        assert_eq!(normalize_guest_name("  mARIA silva "), "Maria silva");
        assert_eq!(normalize_guest_name("élodie"), "Élodie");
        assert_eq!(normalize_guest_name("a"), "A");
        assert_eq!(normalize_guest_name("   "), "");
    }

    #[test]
    fn test_valid_request() {
        let booking = validate_request(&request(), &RoomCatalog::default()).unwrap();

        assert_eq!(booking.guest_name, "Ana souza");
        assert_eq!(booking.room_type, RoomType::Standard);
        assert_eq!(booking.room_count, 2);
        assert_eq!(booking.nights(), 4);
    }

    #[test]
    fn test_zero_length_stay_is_rejected() {
        let mut request = request();
        request.check_out = request.check_in;

        let error = validate_request(&request, &RoomCatalog::default()).unwrap_err();
        assert_eq!(error.reasons(), &[InvalidReason::NonPositiveStay]);
    }

    #[test]
    fn test_each_reason_is_distinct() {
        let catalog = RoomCatalog::default();

        let mut empty_name = request();
        empty_name.guest_name = "  ".to_string();
        assert_eq!(
            validate_request(&empty_name, &catalog).unwrap_err().reasons(),
            &[InvalidReason::EmptyGuestName]
        );

        let mut unknown_type = request();
        unknown_type.room_type = "penthouse".to_string();
        assert_eq!(
            validate_request(&unknown_type, &catalog).unwrap_err().reasons(),
            &[InvalidReason::UnknownRoomType]
        );

        for count in [0, -3] {
            let mut bad_count = request();
            bad_count.room_count = count;
            assert_eq!(
                validate_request(&bad_count, &catalog).unwrap_err().reasons(),
                &[InvalidReason::NonPositiveRoomCount]
            );
        }
    }

    #[test]
    fn test_all_reasons_are_reported_in_fixed_order() {
        let request = BookingRequest {
            guest_name: String::new(),
            check_in: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            room_type: "suite".to_string(),
            room_count: 0,
        };

        let error = validate_request(&request, &RoomCatalog::default()).unwrap_err();
        assert_eq!(
            error.reasons(),
            &[
                InvalidReason::EmptyGuestName,
                InvalidReason::NonPositiveStay,
                InvalidReason::UnknownRoomType,
                InvalidReason::NonPositiveRoomCount,
            ]
        );
    }

    #[test]
    fn test_type_missing_from_catalog_is_unknown() {
        let catalog = RoomCatalog::new(Vec::new());
        let error = validate_request(&request(), &catalog).unwrap_err();
        assert_eq!(error.reasons(), &[InvalidReason::UnknownRoomType]);
    }
}
