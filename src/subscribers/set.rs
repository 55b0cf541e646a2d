//! Non-blocking event fan-out to multiple subscribers.
//!
//! [`SubscriberSet`] gives every subscriber a bounded queue and a
//! dedicated worker task:
//!
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `emit()` uses `try_send` and returns immediately
//! - **Overflow**: the event is dropped for that subscriber only and a
//!   `SubscriberOverflow` is published (overflow events themselves are
//!   never re-reported, to avoid feedback loops)
//! - **Isolation**: a panicking subscriber is caught with `catch_unwind`
//!   and reported; its worker keeps processing subsequent events

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// Per-subscriber queue handle.
struct Lane {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for event subscribers.
pub struct SubscriberSet {
    lanes: Vec<Lane>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates the set and spawns one worker task per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut lanes = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let capacity = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(capacity);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = panic_message(&*panic_err);
                        bus_for_worker.publish(Event::subscriber_panicked(sub.name(), info));
                    }
                }
            });

            lanes.push(Lane { name, sender: tx });
            workers.push(handle);
        }

        Self { lanes, workers, bus }
    }

    /// Delivers an event to every subscriber queue without waiting.
    ///
    /// On a full or closed queue the event is dropped for that subscriber
    /// and a `SubscriberOverflow` is published — unless the event being
    /// emitted is itself an overflow report.
    pub fn emit(&self, event: &Event) {
        let shared = Arc::new(event.clone());
        let is_overflow = shared.is_subscriber_overflow();

        for lane in &self.lanes {
            match lane.sender.try_send(Arc::clone(&shared)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    if !is_overflow {
                        self.bus.publish(Event::subscriber_overflow(lane.name, "full"));
                    }
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    if !is_overflow {
                        self.bus
                            .publish(Event::subscriber_overflow(lane.name, "closed"));
                    }
                }
            }
        }
    }

    /// Closes all queues and waits for the workers to drain.
    pub async fn shutdown(self) {
        drop(self.lanes);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        seen: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Subscribe for Counting {
        async fn on_event(&self, _event: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Panicking;

    #[async_trait]
    impl Subscribe for Panicking {
        async fn on_event(&self, _event: &Event) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_every_subscriber_receives_emitted_events() {
        let bus = Bus::new(64);
        let seen = Arc::new(AtomicUsize::new(0));
        let set = SubscriberSet::new(
            vec![Arc::new(Counting {
                seen: Arc::clone(&seen),
            })],
            bus.clone(),
        );

        for _ in 0..5 {
            set.emit(&Event::now(EventKind::GuestJoined).with_guest("guest-0"));
        }
        set.shutdown().await;

        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_panicking_subscriber_is_isolated_and_reported() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let seen = Arc::new(AtomicUsize::new(0));
        let set = SubscriberSet::new(
            vec![
                Arc::new(Panicking),
                Arc::new(Counting {
                    seen: Arc::clone(&seen),
                }),
            ],
            bus.clone(),
        );

        set.emit(&Event::now(EventKind::CheckedIn).with_guest("guest-1"));
        set.shutdown().await;

        // The healthy subscriber still processed the event.
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        // And the panic was reported on the bus.
        let reported = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let ev = rx.recv().await.expect("bus open");
                if ev.kind == EventKind::SubscriberPanicked {
                    return ev;
                }
            }
        })
        .await
        .expect("panic report");
        assert_eq!(reported.guest.as_deref(), Some("panicking"));
        assert_eq!(reported.reason.as_deref(), Some("boom"));
    }
}
