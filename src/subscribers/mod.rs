//! Event subscribers.
//!
//! Everything the simulation reports — status lines, shutdown notices,
//! stuck-guest detection — flows through the [`Subscribe`] trait:
//!
//! ```text
//! GuestActor ── publish(Event) ──► Bus ──► Coordinator listener
//!                                              │
//!                                              ▼
//!                                        SubscriberSet
//!                                    ┌─────────┼─────────┐
//!                                    ▼         ▼         ▼
//!                                 DeskLog  GuestTracker  custom...
//! ```
//!
//! - [`DeskLog`] prints the human-readable status lines to stdout
//! - [`GuestTracker`] maintains the set of active guests (used for the
//!   stuck list when the shutdown grace is exceeded)
//! - [`SubscriberSet`] fans events out with per-subscriber queues and
//!   panic isolation

mod log;
mod set;
mod subscriber;
mod tracker;

pub use log::DeskLog;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
pub use tracker::GuestTracker;
