//! Stdout reporter for the simulation.
//!
//! [`DeskLog`] narrates every business outcome as a human-readable status
//! line, including the vacancy counts observed inside the relevant
//! critical section — so the printed hotel state is always internally
//! consistent, even under heavy interleaving.
//!
//! ## Output format
//! ```text
//! [joined]      guest=guest-0 kind=man
//! [check-in]    guest=guest-0 kind=man room=single singles=9 doubles=15
//! [check-out]   guest=guest-0 kind=man room=single singles=10 doubles=15
//! [turned-away] guest=guest-3 kind=woman singles=0 doubles=0
//! [left]        guest=guest-0
//! [shutdown-requested]
//! [all-stopped-within-grace]
//! [grace-exceeded]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Prints every simulation event to stdout.
pub struct DeskLog;

#[async_trait]
impl Subscribe for DeskLog {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::CheckedIn => {
                if let (Some(guest), Some(kind), Some(room), Some(v)) =
                    (&e.guest, e.guest_kind, e.room, e.vacancies)
                {
                    println!(
                        "[check-in]    guest={guest} kind={} room={} singles={} doubles={}",
                        kind.label(),
                        room.label(),
                        v.singles,
                        v.doubles
                    );
                }
            }
            EventKind::CheckedOut => {
                if let (Some(guest), Some(kind), Some(room), Some(v)) =
                    (&e.guest, e.guest_kind, e.room, e.vacancies)
                {
                    println!(
                        "[check-out]   guest={guest} kind={} room={} singles={} doubles={}",
                        kind.label(),
                        room.label(),
                        v.singles,
                        v.doubles
                    );
                }
            }
            EventKind::TurnedAway => {
                if let (Some(guest), Some(kind), Some(v)) = (&e.guest, e.guest_kind, e.vacancies) {
                    println!(
                        "[turned-away] guest={guest} kind={} singles={} doubles={}",
                        kind.label(),
                        v.singles,
                        v.doubles
                    );
                }
            }
            EventKind::GuestJoined => {
                if let (Some(guest), Some(kind)) = (&e.guest, e.guest_kind) {
                    println!("[joined]      guest={guest} kind={}", kind.label());
                }
            }
            EventKind::GuestLeft => {
                if let Some(guest) = &e.guest {
                    println!("[left]        guest={guest}");
                }
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                println!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber]  name={:?} reason={:?}",
                    e.guest.as_deref(),
                    e.reason.as_deref()
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "desk-log"
    }
}
