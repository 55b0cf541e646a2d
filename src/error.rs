//! Error types used by the hotelsim runtime.
//!
//! Two enums cover the failure taxonomy:
//!
//! - [`ConfigError`] — setup failures detected before anything is spawned.
//! - [`RuntimeError`] — failures raised by the orchestration itself.
//!
//! Admission failure ("no rooms available") is deliberately *not* an error:
//! it is an expected business outcome carried as an `Option` by
//! [`FrontDesk::try_admit`](crate::FrontDesk::try_admit).
//!
//! Both types provide `as_label` / `as_message` helpers for logs.

use std::time::Duration;
use thiserror::Error;

/// Setup failures: the simulation refuses to start.
///
/// These are fatal — the coordinator reports them before spawning any
/// guest actor, and the process exits non-zero.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The simulation was asked to run with zero guests.
    #[error("guest count must be at least 1")]
    NoGuests,

    /// Both room pools are empty; no admission could ever succeed.
    #[error("hotel has no rooms (single and double capacity are both 0)")]
    NoRooms,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use hotelsim::ConfigError;
    ///
    /// assert_eq!(ConfigError::NoGuests.as_label(), "config_no_guests");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::NoGuests => "config_no_guests",
            ConfigError::NoRooms => "config_no_rooms",
        }
    }
}

/// Errors produced by the hotelsim runtime.
///
/// These represent failures of the orchestration system itself, such as a
/// shutdown sequence exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The configuration failed validation before startup.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Shutdown grace period was exceeded; some guests were still active.
    #[error("shutdown grace {grace:?} exceeded; still active: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of guests that did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use hotelsim::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Config(e) => e.as_label(),
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Config(e) => e.to_string(),
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck guests={stuck:?}")
            }
        }
    }
}
