//! Shared occupancy ledger.
//!
//! [`HotelLedger`] mirrors the pool counts and tracks how many guests
//! occupy each room class. It exists for observability: status lines must
//! show a *consistent* picture of the hotel, which is why every
//! read-modify-write runs inside one critical section at the
//! [`FrontDesk`](crate::FrontDesk) and snapshots are taken before the lock
//! is released.
//!
//! Admission control never consults the ledger — the pools' counters are
//! authoritative. The occupant counters are diagnostic.
//!
//! ## Invariant
//! For each class, `free + guests == capacity` whenever the desk's mutex
//! is not held (conservation). [`HotelLedger::conserved`] checks it and
//! the mutating methods `debug_assert!` it on every update.

use super::pool::RoomClass;

/// Occupancy state for both room classes.
///
/// Plain data: thread safety is provided by the owning
/// [`FrontDesk`](crate::FrontDesk), which wraps the ledger in a mutex.
#[derive(Debug, Clone)]
pub struct HotelLedger {
    singles_capacity: usize,
    doubles_capacity: usize,
    singles_free: usize,
    doubles_free: usize,
    single_guests: usize,
    double_guests: usize,
}

/// Point-in-time view of free rooms, taken under the desk's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vacancies {
    /// Free single rooms at snapshot time.
    pub singles: usize,
    /// Free double rooms at snapshot time.
    pub doubles: usize,
}

impl HotelLedger {
    /// Creates a ledger for an empty hotel: all rooms free, no guests.
    pub fn new(singles_capacity: usize, doubles_capacity: usize) -> Self {
        Self {
            singles_capacity,
            doubles_capacity,
            singles_free: singles_capacity,
            doubles_free: doubles_capacity,
            single_guests: 0,
            double_guests: 0,
        }
    }

    /// Records one guest moving into a room of `class`.
    ///
    /// Callers must already hold a permit for the room; the ledger only
    /// mirrors what the pool granted.
    pub fn check_in(&mut self, class: RoomClass) {
        match class {
            RoomClass::Single => {
                debug_assert!(self.singles_free > 0, "check-in without a free single");
                self.singles_free -= 1;
                self.single_guests += 1;
            }
            RoomClass::Double => {
                debug_assert!(self.doubles_free > 0, "check-in without a free double");
                self.doubles_free -= 1;
                self.double_guests += 1;
            }
        }
        debug_assert!(self.conserved());
    }

    /// Records one guest leaving a room of `class`.
    pub fn check_out(&mut self, class: RoomClass) {
        match class {
            RoomClass::Single => {
                debug_assert!(self.single_guests > 0, "check-out from an empty single");
                self.singles_free += 1;
                self.single_guests -= 1;
            }
            RoomClass::Double => {
                debug_assert!(self.double_guests > 0, "check-out from an empty double");
                self.doubles_free += 1;
                self.double_guests -= 1;
            }
        }
        debug_assert!(self.conserved());
    }

    /// Current free counts.
    pub fn snapshot(&self) -> Vacancies {
        Vacancies {
            singles: self.singles_free,
            doubles: self.doubles_free,
        }
    }

    /// Guests currently occupying rooms of `class`.
    pub fn guests(&self, class: RoomClass) -> usize {
        match class {
            RoomClass::Single => self.single_guests,
            RoomClass::Double => self.double_guests,
        }
    }

    /// Conservation check: `free + guests == capacity` for both classes.
    pub fn conserved(&self) -> bool {
        self.singles_free + self.single_guests == self.singles_capacity
            && self.doubles_free + self.double_guests == self.doubles_capacity
    }
}
