//! Guest actors.
//!
//! - [`GuestKind`] / [`Guest`] — identity and the asymmetric room rule
//! - [`GuestActor`] — the arrival/stay/departure loop run as a tokio task

mod actor;
mod guest;

pub use actor::GuestActor;
pub use guest::{Guest, GuestKind};
