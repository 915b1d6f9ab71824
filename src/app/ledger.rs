//! Booking ledger: the orchestrator of every reservation workflow
//!
//! The ledger owns the room catalog, the in-memory reservation set and the
//! store it persists to. Every mutation is check, change, persist and, when
//! persisting fails, roll back, all inside one `&mut self` call. The borrow
//! checker therefore guarantees a single writer, and the in-memory set never
//! drifts from the last successfully persisted state.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error, info, warn};

use crate::app::availability;
use crate::app::cancellation;
use crate::app::catalog::{RoomCatalog, RoomSpec};
use crate::app::identifier::generate_id;
use crate::app::models::{BookingRequest, Reservation, ReservationId, RoomType, ValidatedBooking};
use crate::app::money::Money;
use crate::app::pricing;
use crate::app::repository::ReservationSet;
use crate::app::stats::{self, Statistics};
use crate::app::storage::ReservationStore;
use crate::app::validation::validate_request;
use crate::errors::{InvalidReason, ReservationError, ReservationResult, StorageResult};

/// Remaining inventory of one room type for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomAvailability {
    /// Room type
    pub room_type: RoomType,
    /// Catalog entry for the type
    pub spec: RoomSpec,
    /// Rooms still free for the whole period
    pub available: i64,
}

/// Reservation ledger backed by a store
#[derive(Debug)]
pub struct Ledger<S> {
    catalog: RoomCatalog,
    reservations: ReservationSet,
    store: S,
}

impl<S: ReservationStore> Ledger<S> {
    /// Open a ledger with whatever the store currently holds
    pub async fn open(catalog: RoomCatalog, store: S) -> StorageResult<Self> {
        let reservations = store.load_all().await?;
        info!("Ledger opened with {} active reservations", reservations.len());
        Ok(Self::with_reservations(catalog, store, reservations))
    }

    /// Build a ledger around an already loaded reservation set
    pub fn with_reservations(catalog: RoomCatalog, store: S, reservations: ReservationSet) -> Self {
        Self {
            catalog,
            reservations,
            store,
        }
    }

    /// Room catalog in use
    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    /// Active reservations in booking order
    pub fn reservations(&self) -> &ReservationSet {
        &self.reservations
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether a request could be booked right now, without booking it
    pub fn check(&self, request: &BookingRequest) -> ReservationResult<ValidatedBooking> {
        let booking = validate_request(request, &self.catalog)?;

        if !availability::is_available(&booking, &self.reservations, &self.catalog)? {
            let available = availability::available_rooms(
                booking.room_type,
                booking.check_in,
                booking.check_out,
                &self.reservations,
                &self.catalog,
            )?;
            return Err(ReservationError::CapacityExceeded {
                room_type: booking.room_type,
                requested: booking.room_count,
                available: available.max(0),
            });
        }

        Ok(booking)
    }

    /// Price a request at catalog rates after validating it
    pub fn quote(&self, request: &BookingRequest) -> ReservationResult<Money> {
        let booking = validate_request(request, &self.catalog)?;
        pricing::quote(&booking, &self.catalog)
    }

    /// Validate, check availability, create and persist a reservation
    ///
    /// Nothing changes when validation, the availability check or pricing
    /// fails. When the store rejects the new state the reservation is taken
    /// back out and the error is reported as `ReservationError::Persistence`.
    pub async fn book(&mut self, request: BookingRequest) -> ReservationResult<Reservation> {
        let priced = self.check(&request).and_then(|booking| {
            let total_price = pricing::quote(&booking, &self.catalog)?;
            Ok((booking, total_price))
        });
        let (booking, total_price) = match priced {
            Ok(priced) => priced,
            Err(e) => {
                warn!("Booking for '{}' rejected: {}", request.guest_name.trim(), e);
                return Err(e);
            }
        };
        let reservation = Reservation {
            id: generate_id(&self.reservations),
            guest_name: booking.guest_name,
            check_in: booking.check_in,
            check_out: booking.check_out,
            room_type: booking.room_type,
            room_count: booking.room_count,
            total_price,
        };

        let previous_last_issued = self.reservations.last_issued_id();
        self.reservations.append(reservation.clone());

        if let Err(e) = self.store.save_all(&self.reservations).await {
            error!(
                "Failed to persist reservation {}, rolling back: {}",
                reservation.id, e
            );
            self.reservations.undo_append(previous_last_issued);
            return Err(ReservationError::Persistence(e));
        }

        info!(
            "Reservation {} created for {}: {} x {} from {} to {}",
            reservation.id,
            reservation.guest_name,
            reservation.room_count,
            reservation.room_type,
            reservation.check_in,
            reservation.check_out
        );
        Ok(reservation)
    }

    /// Cancel a reservation whose stay has not ended at `now`
    ///
    /// On a persistence failure the reservation is put back at its original
    /// position.
    pub async fn cancel(
        &mut self,
        id: ReservationId,
        now: NaiveDateTime,
    ) -> ReservationResult<Reservation> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .ok_or(ReservationError::NotFound { id })?;

        if let Err(e) = cancellation::ensure_cancellable(reservation, now) {
            warn!("Cancellation of {} refused: {}", id, e);
            return Err(e);
        }

        let (index, removed) = self
            .reservations
            .remove_by_id(id)
            .ok_or(ReservationError::NotFound { id })?;

        if let Err(e) = self.store.save_all(&self.reservations).await {
            error!("Failed to persist cancellation of {}, restoring: {}", id, e);
            self.reservations.insert_at(index, removed);
            return Err(ReservationError::Persistence(e));
        }

        info!("Reservation {} for {} cancelled", removed.id, removed.guest_name);
        Ok(removed)
    }

    /// Reservation with this reference code
    pub fn find(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.find_by_id(id)
    }

    /// Every reservation held by a guest, in booking order
    pub fn find_by_guest(&self, guest_name: &str) -> Vec<&Reservation> {
        let found = self.reservations.find_by_guest(guest_name);
        debug!("{} reservations found for '{}'", found.len(), guest_name.trim());
        found
    }

    /// Summary statistics, `ReservationError::Empty` when there are no reservations
    pub fn statistics(&self) -> ReservationResult<Statistics> {
        stats::aggregate(&self.reservations)
    }

    /// Free rooms of every type for `[check_in, check_out)`
    pub fn availability(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ReservationResult<Vec<RoomAvailability>> {
        if check_out <= check_in {
            return Err(ReservationError::invalid(InvalidReason::NonPositiveStay));
        }

        self.catalog
            .iter()
            .map(|(room_type, spec)| {
                let available = availability::available_rooms(
                    room_type,
                    check_in,
                    check_out,
                    &self.reservations,
                    &self.catalog,
                )?;
                Ok(RoomAvailability {
                    room_type,
                    spec,
                    available,
                })
            })
            .collect()
    }
}
