//! Guest actor: the arrival/stay/departure loop.
//!
//! Each guest runs one [`GuestActor`] as an independent tokio task,
//! cycling until its cancellation token fires:
//!
//! ```text
//! loop {
//!   ├─► cancelled? ──► exit
//!   ├─► pause for dwell.sample()            (cancellable sleep)
//!   ├─► desk.try_admit(kind)
//!   │     ├─ Some ──► publish CheckedIn (vacancies from the critical section)
//!   │     │          ├─► stay for dwell.sample()   (cancellable sleep)
//!   │     │          ├─► desk.check_out(stay)      (always runs)
//!   │     │          └─► publish CheckedOut
//!   │     └─ None ──► publish TurnedAway, continue immediately
//!   └─► next iteration
//! }
//! ```
//!
//! ## Rules
//! - Cancellation is observed at safe points: the loop top and both
//!   sleeps. A guest cancelled mid-stay still checks out, so the hotel
//!   is fully vacant once every actor has exited.
//! - A rejection carries no extra penalty; the next iteration's
//!   pre-attempt pause is the only delay before the guest tries again.
//! - One `try_admit` per cycle — no retry or queueing inside a cycle.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};
use crate::guests::Guest;
use crate::policies::DwellPolicy;
use crate::rooms::FrontDesk;

/// Runs one guest's loop against the front desk, publishing every state
/// transition to the bus.
pub struct GuestActor {
    guest: Guest,
    desk: Arc<FrontDesk>,
    bus: Bus,
    dwell: DwellPolicy,
}

impl GuestActor {
    /// Creates a new guest actor.
    pub fn new(guest: Guest, desk: Arc<FrontDesk>, bus: Bus, dwell: DwellPolicy) -> Self {
        Self {
            guest,
            desk,
            bus,
            dwell,
        }
    }

    /// Runs the actor until the token is cancelled.
    ///
    /// Publishes `GuestJoined` on entry and `GuestLeft` on exit; in
    /// between, one business event per admission attempt (`CheckedIn` +
    /// `CheckedOut`, or `TurnedAway`).
    pub async fn run(self, token: CancellationToken) {
        self.bus.publish(
            Event::now(EventKind::GuestJoined)
                .with_guest(Arc::clone(self.guest.name()))
                .with_guest_kind(self.guest.kind()),
        );

        loop {
            if token.is_cancelled() {
                break;
            }

            // Pre-attempt pause. Rejected guests pay this too, but only
            // here at the loop top — never right after a rejection.
            if !self.pause(&token).await {
                break;
            }

            match self.desk.try_admit(self.guest.kind()).await {
                Some(admitted) => {
                    let room = admitted.stay.class();
                    self.bus.publish(
                        Event::now(EventKind::CheckedIn)
                            .with_guest(Arc::clone(self.guest.name()))
                            .with_guest_kind(self.guest.kind())
                            .with_room(room)
                            .with_vacancies(admitted.vacancies),
                    );

                    // The stay. Cancellation may cut it short, but the
                    // check-out below runs regardless so the ledger and
                    // pools return to full vacancy on shutdown.
                    self.pause(&token).await;

                    let vacancies = self.desk.check_out(admitted.stay).await;
                    self.bus.publish(
                        Event::now(EventKind::CheckedOut)
                            .with_guest(Arc::clone(self.guest.name()))
                            .with_guest_kind(self.guest.kind())
                            .with_room(room)
                            .with_vacancies(vacancies),
                    );
                }
                None => {
                    let vacancies = self.desk.vacancies().await;
                    self.bus.publish(
                        Event::now(EventKind::TurnedAway)
                            .with_guest(Arc::clone(self.guest.name()))
                            .with_guest_kind(self.guest.kind())
                            .with_vacancies(vacancies),
                    );
                }
            }
        }

        self.bus.publish(
            Event::now(EventKind::GuestLeft).with_guest(Arc::clone(self.guest.name())),
        );
    }

    /// Sleeps for one dwell draw; returns `false` if cancelled first.
    async fn pause(&self, token: &CancellationToken) -> bool {
        let sleep = time::sleep(self.dwell.sample());
        tokio::pin!(sleep);
        select! {
            _ = &mut sleep => true,
            _ = token.cancelled() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guests::GuestKind;
    use crate::rooms::RoomClass;
    use std::time::Duration;
    use tokio::sync::broadcast::Receiver;

    fn quick_dwell() -> DwellPolicy {
        DwellPolicy {
            min: Duration::from_millis(5),
            max: Duration::from_millis(10),
        }
    }

    async fn wait_for(rx: &mut Receiver<Event>, kind: EventKind) -> Event {
        time::timeout(Duration::from_secs(5), async {
            loop {
                let ev = rx.recv().await.expect("bus open");
                if ev.kind == kind {
                    return ev;
                }
            }
        })
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {kind:?}"))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_guest_checks_out_when_cancelled_mid_stay() {
        let desk = Arc::new(FrontDesk::new(1, 0));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();

        let actor = GuestActor::new(
            Guest::from_index(0),
            Arc::clone(&desk),
            bus.clone(),
            DwellPolicy {
                min: Duration::from_millis(200),
                max: Duration::from_millis(201),
            },
        );
        let handle = tokio::spawn(actor.run(token.clone()));

        let checked_in = wait_for(&mut rx, EventKind::CheckedIn).await;
        assert_eq!(checked_in.room, Some(RoomClass::Single));
        assert_eq!(desk.singles().available(), 0);

        token.cancel();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("actor exits within bound")
            .expect("actor task");

        wait_for(&mut rx, EventKind::CheckedOut).await;
        wait_for(&mut rx, EventKind::GuestLeft).await;
        assert_eq!(desk.singles().available(), 1);
        assert_eq!(desk.vacancies().await.singles, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_guest_reports_when_no_rooms_available() {
        let desk = Arc::new(FrontDesk::new(0, 0));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();

        let actor = GuestActor::new(
            Guest::from_index(1),
            Arc::clone(&desk),
            bus.clone(),
            quick_dwell(),
        );
        let handle = tokio::spawn(actor.run(token.clone()));

        let rejected = wait_for(&mut rx, EventKind::TurnedAway).await;
        assert_eq!(rejected.guest_kind, Some(GuestKind::Woman));
        assert_eq!(rejected.vacancies.map(|v| (v.singles, v.doubles)), Some((0, 0)));

        token.cancel();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("actor exits")
            .expect("actor task");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_guest_exits_without_attempting() {
        let desk = Arc::new(FrontDesk::new(1, 1));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        token.cancel();

        let actor = GuestActor::new(
            Guest::from_index(2),
            Arc::clone(&desk),
            bus.clone(),
            quick_dwell(),
        );
        actor.run(token).await;

        wait_for(&mut rx, EventKind::GuestJoined).await;
        let left = wait_for(&mut rx, EventKind::GuestLeft).await;
        assert_eq!(left.guest.as_deref(), Some("guest-2"));
        assert_eq!(desk.singles().available(), 1);
        assert_eq!(desk.doubles().available(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_man_falls_over_to_double_when_singles_gone() {
        let desk = Arc::new(FrontDesk::new(0, 2));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();

        let actor = GuestActor::new(
            Guest::from_index(4),
            Arc::clone(&desk),
            bus.clone(),
            quick_dwell(),
        );
        let handle = tokio::spawn(actor.run(token.clone()));

        let checked_in = wait_for(&mut rx, EventKind::CheckedIn).await;
        assert_eq!(checked_in.guest_kind, Some(GuestKind::Man));
        assert_eq!(checked_in.room, Some(RoomClass::Double));

        token.cancel();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("actor exits")
            .expect("actor task");
        assert_eq!(desk.doubles().available(), 2);
    }
}
