//! The front desk: admission protocol over the two room pools.
//!
//! [`FrontDesk`] ties the pools and the [`HotelLedger`] together and is
//! the only place that mutates the ledger. The compound update — mirror
//! count, occupant counter, vacancy snapshot — runs inside a single mutex
//! critical section so observers always see a consistent hotel.
//!
//! ## Admission rule
//! ```text
//! try_admit(Man)   ──► singles.try_acquire()
//!                        ├─ Some ──► ledger check-in ──► Stay(single)
//!                        └─ None ──► doubles.try_acquire()
//!                                      ├─ Some ──► ledger check-in ──► Stay(double)
//!                                      └─ None ──► rejected (no state change)
//!
//! try_admit(Woman) ──► doubles.try_acquire()     (women never take singles)
//!                        ├─ Some ──► ledger check-in ──► Stay(double)
//!                        └─ None ──► rejected (no state change)
//! ```
//!
//! ## Rules
//! - `try_admit` never blocks on a pool; only the short ledger lock may
//!   briefly suspend the caller
//! - check-out updates the ledger *before* the room returns to its pool,
//!   so a newly admitted guest can never observe a ledger that is ahead
//!   of the pools
//! - no operation ever holds rooms from both pools, so there is no
//!   lock-ordering hazard between the two

use tokio::sync::Mutex;

use super::ledger::{HotelLedger, Vacancies};
use super::pool::{RoomClass, RoomPermit, RoomPool};
use crate::guests::GuestKind;

/// Proof of admission: one occupied room.
///
/// Consumed by [`FrontDesk::check_out`]. Dropping a `Stay` without
/// checking out returns the room to its pool but skips the ledger
/// bookkeeping — fine in tests, wrong for a well-behaved guest.
#[derive(Debug)]
pub struct Stay {
    permit: RoomPermit,
}

impl Stay {
    /// The class of the occupied room.
    pub fn class(&self) -> RoomClass {
        self.permit.class()
    }
}

/// Successful admission outcome.
#[derive(Debug)]
pub struct CheckIn {
    /// The occupied room; hand it back via [`FrontDesk::check_out`].
    pub stay: Stay,
    /// Vacancies as seen inside the admission critical section.
    pub vacancies: Vacancies,
}

/// Admission and occupancy bookkeeping for the whole hotel.
pub struct FrontDesk {
    singles: RoomPool,
    doubles: RoomPool,
    ledger: Mutex<HotelLedger>,
}

impl FrontDesk {
    /// Creates a desk for an empty hotel with the given pool capacities.
    pub fn new(single_rooms: usize, double_rooms: usize) -> Self {
        Self {
            singles: RoomPool::new(RoomClass::Single, single_rooms),
            doubles: RoomPool::new(RoomClass::Double, double_rooms),
            ledger: Mutex::new(HotelLedger::new(single_rooms, double_rooms)),
        }
    }

    /// Attempts to admit a guest according to the class rule.
    ///
    /// Men try the single pool first and fall over to the double pool;
    /// women only ever try the double pool. Returns `None` when every
    /// eligible pool is exhausted — an expected outcome, not an error.
    ///
    /// The pool acquisition itself never waits; on success the ledger
    /// update and the vacancy snapshot happen atomically under the desk
    /// mutex.
    pub async fn try_admit(&self, kind: GuestKind) -> Option<CheckIn> {
        let permit = match kind {
            GuestKind::Man => self
                .singles
                .try_acquire()
                .or_else(|| self.doubles.try_acquire()),
            GuestKind::Woman => self.doubles.try_acquire(),
        }?;

        let vacancies = {
            let mut ledger = self.ledger.lock().await;
            ledger.check_in(permit.class());
            ledger.snapshot()
        };

        Some(CheckIn {
            stay: Stay { permit },
            vacancies,
        })
    }

    /// Checks a guest out of their room.
    ///
    /// The ledger is updated first; only then does the room return to its
    /// pool (by dropping the permit). Returns the vacancies seen inside
    /// the critical section, for the departure status line.
    pub async fn check_out(&self, stay: Stay) -> Vacancies {
        let vacancies = {
            let mut ledger = self.ledger.lock().await;
            ledger.check_out(stay.class());
            ledger.snapshot()
        };
        drop(stay);
        vacancies
    }

    /// Consistent vacancy read, for rejection status lines.
    pub async fn vacancies(&self) -> Vacancies {
        self.ledger.lock().await.snapshot()
    }

    /// The single-room pool.
    pub fn singles(&self) -> &RoomPool {
        &self.singles
    }

    /// The double-room pool.
    pub fn doubles(&self) -> &RoomPool {
        &self.doubles
    }
}
