//! Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging custom observers
//! into the simulation. Each subscriber gets a dedicated worker task and
//! a bounded queue (capacity via [`Subscribe::queue_capacity`]); panics
//! are caught and reported as [`EventKind::SubscriberPanicked`](crate::EventKind).
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event **for this subscriber only** and
//!   publishes [`EventKind::SubscriberOverflow`](crate::EventKind);
//!   other subscribers are unaffected.
//! - Events are processed sequentially (FIFO) per subscriber.

use async_trait::async_trait;

use crate::events::Event;

/// Observer of simulation events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow/panic events.
    ///
    /// Prefer short, descriptive names (e.g. "desk-log", "tracker").
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity for this subscriber (min 1, clamped).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
