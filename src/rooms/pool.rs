//! Bounded room pools with non-blocking acquisition.
//!
//! A [`RoomPool`] is a counting semaphore seeded with the pool's capacity.
//! [`RoomPool::try_acquire`] is the admission-control primitive: it either
//! takes a room immediately or reports that none is free, and it never
//! suspends the caller — a rejected guest must be able to fall over to
//! another pool (or leave) without waiting.
//!
//! Release is the drop of the returned [`RoomPermit`]. Tying the release
//! to ownership of the permit makes over-release unrepresentable: a room
//! can only return to the pool it came from, exactly once.
//!
//! ## Rules
//! - `try_acquire` succeeds iff the free count is positive *at the instant
//!   of the attempt*; on failure the pool state is unchanged
//! - pool operations are atomic with respect to every concurrent actor
//! - the free count never exceeds the capacity the pool was created with

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// The two room categories offered by the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomClass {
    /// One-bed room; only men are assigned here.
    Single,
    /// Two-bed room; open to everyone.
    Double,
}

impl RoomClass {
    /// Short lowercase label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            RoomClass::Single => "single",
            RoomClass::Double => "double",
        }
    }
}

/// A bounded pool of rooms of one class.
///
/// Cheap to share: the pool itself is `Clone` and all clones operate on
/// the same underlying counter.
#[derive(Clone, Debug)]
pub struct RoomPool {
    class: RoomClass,
    capacity: usize,
    rooms: Arc<Semaphore>,
}

impl RoomPool {
    /// Creates a pool with `capacity` free rooms.
    pub fn new(class: RoomClass, capacity: usize) -> Self {
        Self {
            class,
            capacity,
            rooms: Arc::new(Semaphore::new(capacity)),
        }
    }

    /// Attempts to take one room without waiting.
    ///
    /// Returns a [`RoomPermit`] iff a room was free at the instant of the
    /// call; `None` otherwise, with no state change. Never blocks.
    pub fn try_acquire(&self) -> Option<RoomPermit> {
        let permit = Arc::clone(&self.rooms).try_acquire_owned().ok()?;
        Some(RoomPermit {
            class: self.class,
            _permit: permit,
        })
    }

    /// Number of currently free rooms.
    pub fn available(&self) -> usize {
        self.rooms.available_permits()
    }

    /// Static capacity this pool was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The room class this pool hands out.
    pub fn class(&self) -> RoomClass {
        self.class
    }
}

/// Proof of holding one room from a [`RoomPool`].
///
/// Dropping the permit returns the room to its pool. Note that the drop
/// bypasses the [`FrontDesk`](crate::FrontDesk) ledger — actors should
/// check out through the desk so the occupancy bookkeeping stays in step.
#[derive(Debug)]
pub struct RoomPermit {
    class: RoomClass,
    _permit: OwnedSemaphorePermit,
}

impl RoomPermit {
    /// The class of the held room.
    pub fn class(&self) -> RoomClass {
        self.class
    }
}
