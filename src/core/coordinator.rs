//! Coordinator: spawns guest actors, fans out events, drives shutdown.
//!
//! The [`Coordinator`] owns the event bus, the [`SubscriberSet`], the
//! [`FrontDesk`], and the runtime configuration. It spawns one
//! [`GuestActor`] per configured guest and waits for a termination
//! request, then relays cancellation to every actor and reaps them all
//! before returning.
//!
//! ## High-level flow
//! ```text
//! Coordinator::run()
//!   ├─ cfg.validate()                        (setup failures stop here)
//!   ├─ subscriber_listener(): Bus ──► SubscriberSet::emit   (fire-and-forget)
//!   ├─ spawn guests: guest-0 .. guest-N-1
//!   │     kind alternates by index parity (even = man, odd = woman)
//!   │     each actor gets a child CancellationToken
//!   │     set.spawn(actor.run(child_token))
//!   └─ drive_shutdown():
//!        select:
//!          OS signal / shutdown_handle() cancelled
//!             └─► publish ShutdownRequested
//!             └─► cancel runtime token   → propagates to all actors
//!             └─► wait_all_with_grace(cfg.grace):
//!                    ├─ all joined   → publish AllStoppedWithin, Ok
//!                    └─ grace passed → publish GraceExceeded,
//!                                      Err(GraceExceeded { stuck })
//!          all actors exited on their own → Ok
//! ```
//!
//! Teardown order is the reverse of construction: actors are reaped
//! before the desk and bus are dropped with the coordinator.

use std::sync::Arc;

use tokio::{task::JoinSet, time};
use tokio_util::sync::CancellationToken;

use crate::config::SimConfig;
use crate::core::shutdown;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::guests::{Guest, GuestActor};
use crate::rooms::FrontDesk;
use crate::subscribers::{GuestTracker, Subscribe, SubscriberSet};

/// Orchestrates guest actors, event delivery, and graceful shutdown.
pub struct Coordinator {
    cfg: SimConfig,
    bus: Bus,
    desk: Arc<FrontDesk>,
    subs: Arc<SubscriberSet>,
    tracker: Arc<GuestTracker>,
    shutdown: CancellationToken,
}

impl Coordinator {
    /// Creates a coordinator with the given config and subscribers.
    ///
    /// `tracker` should be the same instance as the one included in
    /// `subscribers`; it is added automatically if absent.
    pub fn new(
        cfg: SimConfig,
        mut subscribers: Vec<Arc<dyn Subscribe>>,
        tracker: Arc<GuestTracker>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let desk = Arc::new(FrontDesk::new(cfg.single_rooms, cfg.double_rooms));

        let has_tracker = subscribers
            .iter()
            .any(|s| std::ptr::eq::<dyn Subscribe>(&**s as _, &*tracker as &dyn Subscribe));
        if !has_tracker {
            subscribers.push(tracker.clone());
        }

        let subs = Arc::new(SubscriberSet::new(subscribers, bus.clone()));
        Self {
            cfg,
            bus,
            desk,
            subs,
            tracker,
            shutdown: CancellationToken::new(),
        }
    }

    /// A handle that requests shutdown when cancelled.
    ///
    /// Equivalent to the process receiving a termination signal; useful
    /// for embedders and tests.
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// The event bus actors publish to.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The front desk shared by all guests.
    pub fn desk(&self) -> &Arc<FrontDesk> {
        &self.desk
    }

    /// Runs the simulation until a termination signal arrives (or the
    /// [`shutdown_handle`](Self::shutdown_handle) is cancelled), then
    /// shuts down gracefully. May end with
    /// [`RuntimeError::GraceExceeded`].
    pub async fn run(&self) -> Result<(), RuntimeError> {
        self.cfg.validate()?;
        self.subscriber_listener();

        let token = self.shutdown.child_token();
        let mut set = JoinSet::new();
        self.spawn_guests(&mut set, &token);
        self.drive_shutdown(&mut set, &token).await
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    /// Spawns one actor per configured guest, kinds alternating by index
    /// parity.
    fn spawn_guests(&self, set: &mut JoinSet<()>, runtime_token: &CancellationToken) {
        for index in 0..self.cfg.guests {
            let actor = GuestActor::new(
                Guest::from_index(index),
                Arc::clone(&self.desk),
                self.bus.clone(),
                self.cfg.dwell,
            );
            let child = runtime_token.child_token();
            set.spawn(actor.run(child));
        }
    }

    /// Waits until all actors finish on their own or shutdown is
    /// requested, then relays cancellation and reaps within the grace.
    async fn drive_shutdown(
        &self,
        set: &mut JoinSet<()>,
        runtime_token: &CancellationToken,
    ) -> Result<(), RuntimeError> {
        tokio::select! {
            _ = shutdown::wait_for_shutdown_signal() => {}
            _ = runtime_token.cancelled() => {}
            _ = async { while set.join_next().await.is_some() {} } => {
                return Ok(());
            }
        }

        self.bus.publish(Event::now(EventKind::ShutdownRequested));
        runtime_token.cancel();
        self.wait_all_with_grace(set).await
    }

    /// Reaps all actors within the configured grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`] with the tracker's stuck list.
    async fn wait_all_with_grace(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let done = async { while set.join_next().await.is_some() {} };

        match time::timeout(grace, done).await {
            Ok(_) => {
                self.bus.publish(Event::now(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(Event::now(EventKind::GraceExceeded));
                let stuck = self.tracker.snapshot().await;
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::guests::GuestKind;
    use crate::policies::DwellPolicy;
    use std::time::Duration;

    fn quick_cfg(guests: usize) -> SimConfig {
        SimConfig {
            guests,
            single_rooms: 2,
            double_rooms: 3,
            grace: Duration::from_secs(10),
            dwell: DwellPolicy {
                min: Duration::from_millis(5),
                max: Duration::from_millis(15),
            },
            ..SimConfig::default()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run_shuts_down_cleanly_on_handle_cancel() {
        let tracker = Arc::new(GuestTracker::new());
        let coordinator = Arc::new(Coordinator::new(quick_cfg(6), vec![], tracker.clone()));
        let handle = coordinator.shutdown_handle();

        let runner = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run().await })
        };

        // The tracker was auto-added to the subscriber set; wait until it
        // observes the first guest.
        time::timeout(Duration::from_secs(5), async {
            while !tracker.is_active("guest-0").await {
                time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("tracker sees guest-0");

        handle.cancel();
        let result = time::timeout(Duration::from_secs(5), runner)
            .await
            .expect("run returns within grace")
            .expect("runner task");
        assert!(result.is_ok(), "clean shutdown expected: {result:?}");

        // Every guest checked out on the way down.
        let vacancies = coordinator.desk().vacancies().await;
        assert_eq!(vacancies.singles, 2);
        assert_eq!(vacancies.doubles, 3);
        assert_eq!(coordinator.desk().singles().available(), 2);
        assert_eq!(coordinator.desk().doubles().available(), 3);

        // Eventually the tracker drains to empty.
        time::timeout(Duration::from_secs(5), async {
            while !tracker.snapshot().await.is_empty() {
                time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("tracker drains");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_guests_alternate_kinds_by_index() {
        let tracker = Arc::new(GuestTracker::new());
        let coordinator = Arc::new(Coordinator::new(quick_cfg(4), vec![], tracker));
        let mut rx = coordinator.bus().subscribe();
        let handle = coordinator.shutdown_handle();

        let runner = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run().await })
        };

        let mut kinds = std::collections::HashMap::new();
        time::timeout(Duration::from_secs(5), async {
            while kinds.len() < 4 {
                let ev = rx.recv().await.expect("bus open");
                if ev.kind == EventKind::GuestJoined {
                    kinds.insert(ev.guest.unwrap().to_string(), ev.guest_kind.unwrap());
                }
            }
        })
        .await
        .expect("all guests join");

        assert_eq!(kinds["guest-0"], GuestKind::Man);
        assert_eq!(kinds["guest-1"], GuestKind::Woman);
        assert_eq!(kinds["guest-2"], GuestKind::Man);
        assert_eq!(kinds["guest-3"], GuestKind::Woman);

        handle.cancel();
        time::timeout(Duration::from_secs(5), runner)
            .await
            .expect("run returns")
            .expect("runner task")
            .expect("clean shutdown");
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_spawning() {
        let tracker = Arc::new(GuestTracker::new());
        let coordinator = Coordinator::new(quick_cfg(0), vec![], tracker);

        let err = coordinator.run().await.expect_err("zero guests");
        assert!(matches!(
            err,
            RuntimeError::Config(ConfigError::NoGuests)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_zero_grace_reports_stuck_guests() {
        let cfg = SimConfig {
            grace: Duration::ZERO,
            dwell: DwellPolicy {
                min: Duration::from_millis(500),
                max: Duration::from_millis(1000),
            },
            ..quick_cfg(3)
        };
        let tracker = Arc::new(GuestTracker::new());
        let coordinator = Arc::new(Coordinator::new(cfg, vec![], tracker));
        let handle = coordinator.shutdown_handle();

        let runner = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run().await })
        };

        time::sleep(Duration::from_millis(100)).await;
        handle.cancel();

        let result = time::timeout(Duration::from_secs(5), runner)
            .await
            .expect("run returns")
            .expect("runner task");
        let err = result.expect_err("zero grace cannot be met");
        assert!(matches!(err, RuntimeError::GraceExceeded { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_sequential_lifecycles() {
        for _ in 0..2 {
            let tracker = Arc::new(GuestTracker::new());
            let coordinator = Arc::new(Coordinator::new(quick_cfg(4), vec![], tracker));
            let handle = coordinator.shutdown_handle();

            let runner = {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.run().await })
            };

            time::sleep(Duration::from_millis(100)).await;
            handle.cancel();

            time::timeout(Duration::from_secs(5), runner)
                .await
                .expect("run returns")
                .expect("runner task")
                .expect("clean shutdown");

            let vacancies = coordinator.desk().vacancies().await;
            assert_eq!((vacancies.singles, vacancies.doubles), (2, 3));
        }
    }
}
