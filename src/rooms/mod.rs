//! Room accounting: pools, occupancy ledger, and the front desk.
//!
//! This module owns the admission-control core of the simulation:
//! - [`RoomPool`] — a bounded counter per room class with non-blocking
//!   acquisition ([`RoomPool::try_acquire`]) and RAII release;
//! - [`HotelLedger`] — the shared occupancy state mutated under one mutex;
//! - [`FrontDesk`] — the admission protocol tying pools and ledger
//!   together.

mod desk;
mod ledger;
mod pool;

pub use desk::{CheckIn, FrontDesk, Stay};
pub use ledger::{HotelLedger, Vacancies};
pub use pool::{RoomClass, RoomPermit, RoomPool};
