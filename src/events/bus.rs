//! Broadcast bus for runtime events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]: guest
//! actors and the coordinator publish without blocking, and the
//! coordinator's listener fans events out to subscribers.
//!
//! ```text
//! Publishers (many):                  Subscriber (one):
//!   guest-0 ──┐
//!   guest-1 ──┼──────► Bus ─────────► subscriber_listener ───► SubscriberSet
//!   guest-N ──┤  (broadcast chan)       (in Coordinator)
//!   coord.  ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits
//! - **Bounded capacity**: one ring buffer shared by all receivers
//! - **Lag handling**: slow receivers observe `RecvError::Lagged(n)` and
//!   skip the `n` oldest items
//! - **No persistence**: events are dropped when no receiver is attached

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given ring-buffer capacity (min 1, clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers the event is dropped; either way the
    /// call returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new independent receiver.
    ///
    /// A receiver only observes events sent after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::now(EventKind::ShutdownRequested));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::ShutdownRequested);
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_silent() {
        let bus = Bus::new(4);
        // No receiver attached; must not block or panic.
        bus.publish(Event::now(EventKind::GuestJoined).with_guest("guest-0"));
    }

    #[tokio::test]
    async fn test_each_receiver_sees_every_event() {
        let bus = Bus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::now(EventKind::GuestJoined).with_guest("guest-1"));

        assert_eq!(rx1.recv().await.expect("rx1").kind, EventKind::GuestJoined);
        assert_eq!(rx2.recv().await.expect("rx2").kind, EventKind::GuestJoined);
    }
}
