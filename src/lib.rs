//! # hotelsim
//!
//! **hotelsim** simulates a small hotel's room-allocation policy under
//! concurrent guest arrivals.
//!
//! Independent guest actors contend for two bounded room pools (single and
//! double) with an asymmetric assignment rule, non-blocking admission
//! attempts, and a mutex-protected occupancy ledger. The crate is both a
//! library and a CLI binary.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  GuestActor  │   │  GuestActor  │   │  GuestActor  │
//!     │ (guest-0,man)│   │(guest-1,wmn.)│   │ (guest-N, …) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ try_admit /      │                  │
//!            │ check_out        ▼                  │
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  FrontDesk                                                        │
//! │  - RoomPool(single, cap 10)   non-blocking try_acquire            │
//! │  - RoomPool(double, cap 15)   RAII release                        │
//! │  - HotelLedger (one Mutex)    consistent vacancy snapshots        │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ publish Events (CheckedIn / CheckedOut / TurnedAway / …)
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │  subscriber_listener   │
//!                       │    (in Coordinator)    │
//!                       └───┬────────────────┬───┘
//!                           ▼                ▼
//!                       DeskLog         GuestTracker
//!                    (status lines)   (stuck detection)
//! ```
//!
//! ### Guest lifecycle
//! ```text
//! Coordinator ──► GuestActor::run(child_token)
//!
//! loop {
//!   ├─► cancelled? → exit
//!   ├─► pause [500ms, 2500ms)              (cancellable)
//!   ├─► try_admit:
//!   │     man   → single pool, else double pool
//!   │     woman → double pool only
//!   ├─► admitted:
//!   │     ├─► CheckedIn (vacancies from the critical section)
//!   │     ├─► stay [500ms, 2500ms)         (cancellable; always
//!   │     │                                 followed by check-out)
//!   │     └─► CheckedOut
//!   └─► rejected: TurnedAway, next cycle immediately
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types                           |
//! |-------------------|----------------------------------------------------------|-------------------------------------|
//! | **Admission**     | Non-blocking, semaphore-backed room acquisition.         | [`FrontDesk`], [`RoomPool`]         |
//! | **Accounting**    | Mutex-guarded occupancy ledger with snapshots.           | [`HotelLedger`], [`Vacancies`]      |
//! | **Actors**        | Cancellable guest loops with randomized pacing.          | [`GuestActor`], [`DwellPolicy`]     |
//! | **Observability** | Event bus plus pluggable subscribers.                    | [`Bus`], [`Subscribe`], [`DeskLog`] |
//! | **Lifecycle**     | Spawn, signal-driven shutdown, grace window, reaping.    | [`Coordinator`]                     |
//! | **Errors**        | Setup vs. runtime failure taxonomy.                      | [`ConfigError`], [`RuntimeError`]   |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use hotelsim::{Coordinator, DeskLog, GuestTracker, SimConfig, Subscribe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = SimConfig {
//!         guests: 8,
//!         ..SimConfig::default()
//!     };
//!
//!     let tracker = Arc::new(GuestTracker::new());
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(DeskLog), tracker.clone()];
//!
//!     let coordinator = Coordinator::new(cfg, subs, tracker);
//!     coordinator.run().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod guests;
mod policies;
mod rooms;
mod subscribers;

// ---- Public re-exports ----

pub use config::SimConfig;
pub use core::Coordinator;
pub use error::{ConfigError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use guests::{Guest, GuestActor, GuestKind};
pub use policies::DwellPolicy;
pub use rooms::{CheckIn, FrontDesk, HotelLedger, RoomClass, RoomPermit, RoomPool, Stay, Vacancies};
pub use subscribers::{DeskLog, GuestTracker, Subscribe, SubscriberSet};
