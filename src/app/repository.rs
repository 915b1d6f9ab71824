//! In-memory reservation repository
//!
//! `ReservationSet` is the authoritative state of the ledger: an ordered list
//! of active reservations (insertion order is booking order) plus the highest
//! reference code ever issued. It is persisted in full after every change.

use crate::app::models::{Reservation, ReservationId};
use crate::app::validation::normalize_guest_name;

/// Ordered collection of active reservations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationSet {
    reservations: Vec<Reservation>,
    last_issued_id: Option<ReservationId>,
}

impl ReservationSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from persisted parts
    ///
    /// The high-water mark is raised to the largest id present so that a
    /// hand-edited file cannot make the generator reissue a live id.
    pub fn from_parts(reservations: Vec<Reservation>, last_issued_id: Option<ReservationId>) -> Self {
        let highest = reservations.iter().map(|r| r.id).max();
        Self {
            last_issued_id: highest.max(last_issued_id),
            reservations,
        }
    }

    /// Number of active reservations
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// True when no reservation is active
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Iterate in booking order
    pub fn iter(&self) -> std::slice::Iter<'_, Reservation> {
        self.reservations.iter()
    }

    /// Reservations in booking order
    pub fn as_slice(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Highest reference code issued so far, including cancelled ones
    pub fn last_issued_id(&self) -> Option<ReservationId> {
        self.last_issued_id
    }

    /// Append a newly created reservation
    pub fn append(&mut self, reservation: Reservation) {
        self.last_issued_id = self.last_issued_id.max(Some(reservation.id));
        self.reservations.push(reservation);
    }

    /// Undo the most recent `append`, restoring the previous high-water mark
    pub fn undo_append(&mut self, previous_last_issued: Option<ReservationId>) -> Option<Reservation> {
        let removed = self.reservations.pop();
        self.last_issued_id = previous_last_issued;
        removed
    }

    /// Remove a reservation by id, returning it with its former position
    pub fn remove_by_id(&mut self, id: ReservationId) -> Option<(usize, Reservation)> {
        let index = self.position(id)?;
        Some((index, self.reservations.remove(index)))
    }

    /// Put a reservation back at a given position (rollback of `remove_by_id`)
    pub fn insert_at(&mut self, index: usize, reservation: Reservation) {
        let index = index.min(self.reservations.len());
        self.reservations.insert(index, reservation);
    }

    /// Find a reservation by exact id
    pub fn find_by_id(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Every reservation held by a guest, in booking order
    ///
    /// The query gets the same canonical capitalization as stored names.
    pub fn find_by_guest(&self, guest_name: &str) -> Vec<&Reservation> {
        let wanted = normalize_guest_name(guest_name);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.reservations
            .iter()
            .filter(|r| r.guest_name == wanted)
            .collect()
    }

    fn position(&self, id: ReservationId) -> Option<usize> {
        self.reservations.iter().position(|r| r.id == id)
    }
}

impl<'a> IntoIterator for &'a ReservationSet {
    type Item = &'a Reservation;
    type IntoIter = std::slice::Iter<'a, Reservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
