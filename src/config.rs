//! Global simulation configuration.
//!
//! [`SimConfig`] centralizes the settings consumed by the
//! [`Coordinator`](crate::Coordinator):
//!
//! 1. **Hotel shape**: room-pool capacities (defaults match the classic
//!    10 single / 15 double layout)
//! 2. **Workload**: how many guest actors to spawn
//! 3. **Shutdown behavior**: grace period for graceful termination
//! 4. **Event system**: bus capacity for event delivery
//! 5. **Pacing**: the randomized dwell policy for pauses and stays

use std::time::Duration;

use crate::error::ConfigError;
use crate::policies::DwellPolicy;

/// Configuration for one simulation run.
///
/// ## Field semantics
/// - `guests`: number of concurrent guest actors (must be ≥ 1)
/// - `single_rooms` / `double_rooms`: pool capacities (at least one room
///   in total is required)
/// - `grace`: maximum wait for guests to stop after shutdown is requested
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `dwell`: randomized duration range used both for the pre-attempt
///   pause and for the length of a stay
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of concurrent guest actors to spawn.
    ///
    /// Guests alternate kind by index parity: even indices are men,
    /// odd indices are women.
    pub guests: usize,

    /// Capacity of the single-room pool.
    pub single_rooms: usize,

    /// Capacity of the double-room pool.
    pub double_rooms: usize,

    /// Maximum time to wait for guests to stop after shutdown is requested.
    ///
    /// When the window is exceeded the coordinator returns
    /// [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded)
    /// listing the guests that were still active.
    pub grace: Duration,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// will skip older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Randomized pacing for guest actors.
    pub dwell: DwellPolicy,
}

impl SimConfig {
    /// Checks the configuration for values that would make the run
    /// meaningless. Called by the coordinator before spawning anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.guests == 0 {
            return Err(ConfigError::NoGuests);
        }
        if self.single_rooms == 0 && self.double_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        Ok(())
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SimConfig {
    /// Default configuration:
    ///
    /// - `guests = 8`
    /// - `single_rooms = 10`, `double_rooms = 15`
    /// - `grace = 5s`
    /// - `bus_capacity = 1024`
    /// - `dwell = DwellPolicy::default()` (500ms..2500ms)
    fn default() -> Self {
        Self {
            guests: 8,
            single_rooms: 10,
            double_rooms: 15,
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
            dwell: DwellPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_guests_rejected() {
        let cfg = SimConfig {
            guests: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoGuests));
    }

    #[test]
    fn test_roomless_hotel_rejected() {
        let cfg = SimConfig {
            single_rooms: 0,
            double_rooms: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoRooms));
    }

    #[test]
    fn test_single_only_hotel_is_valid() {
        let cfg = SimConfig {
            single_rooms: 3,
            double_rooms: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_bus_capacity_clamped_to_one() {
        let cfg = SimConfig {
            bus_capacity: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
