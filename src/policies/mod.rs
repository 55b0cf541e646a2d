//! Pacing policies for guest actors.
//!
//! - [`DwellPolicy`] — randomized duration range used for the pre-attempt
//!   pause and for the length of a stay.

mod dwell;

pub use dwell::DwellPolicy;
