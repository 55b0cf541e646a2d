//! Runtime events emitted by guest actors and the coordinator.
//!
//! [`EventKind`] classifies events across three categories:
//! - **Business events**: admission outcomes and departures
//!   (checked-in, checked-out, turned-away)
//! - **Actor lifecycle**: guests joining and leaving the simulation
//! - **Shutdown events**: the signal-to-quiescence sequence
//!
//! [`Event`] carries optional metadata — guest name and kind, room class,
//! a vacancy snapshot taken inside the admission critical section — plus
//! a wall-clock timestamp and a globally monotonic sequence number.
//!
//! ## Ordering
//! `seq` increases monotonically across all publishers. Subscribers that
//! may observe events out of order (e.g. [`GuestTracker`](crate::GuestTracker))
//! use it to reject stale updates.
//!
//! ## Example
//! ```rust
//! use hotelsim::{Event, EventKind, GuestKind, RoomClass};
//!
//! let ev = Event::now(EventKind::CheckedIn)
//!     .with_guest("guest-4")
//!     .with_guest_kind(GuestKind::Man)
//!     .with_room(RoomClass::Single);
//!
//! assert_eq!(ev.kind, EventKind::CheckedIn);
//! assert_eq!(ev.guest.as_deref(), Some("guest-4"));
//! assert_eq!(ev.room, Some(RoomClass::Single));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::guests::GuestKind;
use crate::rooms::{RoomClass, Vacancies};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Business events ===
    /// A guest was admitted to a room.
    ///
    /// Sets: `guest`, `guest_kind`, `room`, `vacancies`.
    CheckedIn,

    /// A guest left their room.
    ///
    /// Sets: `guest`, `guest_kind`, `room`, `vacancies`.
    CheckedOut,

    /// Admission failed: every eligible pool was exhausted.
    ///
    /// Sets: `guest`, `guest_kind`, `vacancies`.
    TurnedAway,

    // === Actor lifecycle ===
    /// A guest actor entered its arrival loop.
    ///
    /// Sets: `guest`, `guest_kind`.
    GuestJoined,

    /// A guest actor exited its loop (cancellation observed).
    ///
    /// Sets: `guest`.
    GuestLeft,

    // === Shutdown events ===
    /// Shutdown requested (OS signal or explicit handle).
    ShutdownRequested,

    /// All guests stopped within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some guests did not stop in time.
    GraceExceeded,

    // === Subscriber plumbing ===
    /// A subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets: `guest` (subscriber name), `reason`.
    SubscriberOverflow,

    /// A subscriber panicked while processing an event.
    ///
    /// Sets: `guest` (subscriber name), `reason`.
    SubscriberPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - remaining fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Guest name (or subscriber name for plumbing events).
    pub guest: Option<Arc<str>>,
    /// Kind of the guest involved.
    pub guest_kind: Option<GuestKind>,
    /// Room class involved in a check-in/check-out.
    pub room: Option<RoomClass>,
    /// Vacancy snapshot taken inside the relevant critical section.
    pub vacancies: Option<Vacancies>,
    /// Human-readable detail (overflow reasons, panic info).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and
    /// the next global sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            guest: None,
            guest_kind: None,
            room: None,
            vacancies: None,
            reason: None,
        }
    }

    /// Attaches a guest (or subscriber) name.
    #[inline]
    pub fn with_guest(mut self, guest: impl Into<Arc<str>>) -> Self {
        self.guest = Some(guest.into());
        self
    }

    /// Attaches the guest kind.
    #[inline]
    pub fn with_guest_kind(mut self, kind: GuestKind) -> Self {
        self.guest_kind = Some(kind);
        self
    }

    /// Attaches the room class.
    #[inline]
    pub fn with_room(mut self, room: RoomClass) -> Self {
        self.room = Some(room);
        self
    }

    /// Attaches a vacancy snapshot.
    #[inline]
    pub fn with_vacancies(mut self, vacancies: Vacancies) -> Self {
        self.vacancies = Some(vacancies);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_guest(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_guest(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::now(EventKind::CheckedIn);
        let b = Event::now(EventKind::CheckedOut);
        let c = Event::now(EventKind::TurnedAway);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::now(EventKind::CheckedOut)
            .with_guest("guest-7")
            .with_guest_kind(GuestKind::Woman)
            .with_room(RoomClass::Double)
            .with_vacancies(Vacancies {
                singles: 10,
                doubles: 15,
            });

        assert_eq!(ev.guest.as_deref(), Some("guest-7"));
        assert_eq!(ev.guest_kind, Some(GuestKind::Woman));
        assert_eq!(ev.room, Some(RoomClass::Double));
        assert_eq!(
            ev.vacancies,
            Some(Vacancies {
                singles: 10,
                doubles: 15
            })
        );
        assert!(ev.reason.is_none());
    }

    #[test]
    fn test_overflow_constructor() {
        let ev = Event::subscriber_overflow("desk-log", "full");
        assert!(ev.is_subscriber_overflow());
        assert_eq!(ev.guest.as_deref(), Some("desk-log"));
        assert_eq!(ev.reason.as_deref(), Some("full"));
    }
}
