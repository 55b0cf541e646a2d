//! Randomized pacing for guest actors.
//!
//! [`DwellPolicy`] draws a fresh duration from a half-open range
//! `[min, max)` for every sleep a guest performs. The same policy is used
//! twice per cycle: once for the pause before an admission attempt and
//! once for the length of a stay, so a single range shapes the whole
//! simulation tempo.
//!
//! The default range of 500ms to 2500ms keeps runs short while leaving
//! enough overlap between guests for real contention on the room pools.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use hotelsim::DwellPolicy;
//!
//! let dwell = DwellPolicy {
//!     min: Duration::from_millis(500),
//!     max: Duration::from_millis(2500),
//! };
//!
//! let d = dwell.sample();
//! assert!(d >= dwell.min && d < dwell.max);
//! ```

use std::time::Duration;

use rand::Rng;

/// Half-open random duration range `[min, max)`.
///
/// Sampling is uniform at microsecond granularity. A degenerate range
/// (`max <= min`) always yields `min`, which makes near-zero policies
/// convenient in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DwellPolicy {
    /// Inclusive lower bound.
    pub min: Duration,
    /// Exclusive upper bound.
    pub max: Duration,
}

impl Default for DwellPolicy {
    /// Returns the 500ms..2500ms range.
    fn default() -> Self {
        Self {
            min: Duration::from_millis(500),
            max: Duration::from_millis(2500),
        }
    }
}

impl DwellPolicy {
    /// Draws one duration uniformly from `[min, max)`.
    pub fn sample(&self) -> Duration {
        let lo = self.min.as_micros() as u64;
        let hi = self.max.as_micros() as u64;
        if hi <= lo {
            return self.min;
        }
        let mut rng = rand::rng();
        Duration::from_micros(rng.random_range(lo..hi))
    }
}
