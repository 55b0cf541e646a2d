//! Active-guest tracker with sequence-based ordering.
//!
//! [`GuestTracker`] maintains the authoritative set of guests whose
//! actors are still running, using event sequence numbers to handle
//! out-of-order delivery. The coordinator asks for a
//! [`snapshot`](GuestTracker::snapshot) when the shutdown grace is
//! exceeded to name the stuck guests.
//!
//! ## Rules
//! - Only `GuestJoined` / `GuestLeft` change the active state
//! - Events with `seq <= last_seq` for a guest are rejected (stale)
//! - Other events update `seq` only
//! - Reads (`snapshot`, `is_active`) are eventually consistent

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Per-guest state for ordering validation.
#[derive(Debug, Clone)]
struct GuestState {
    last_seq: u64,
    active: bool,
}

/// Thread-safe tracker of running guest actors.
pub struct GuestTracker {
    state: RwLock<HashMap<String, GuestState>>,
}

impl GuestTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Applies an event if it is newer than the last seen for its guest.
    ///
    /// Returns `true` when the active state changed.
    ///
    /// ```text
    /// update(GuestLeft,   seq=100) → active=false, last_seq=100
    /// update(GuestJoined, seq=99)  → rejected (stale)
    /// ```
    pub async fn update(&self, ev: &Event) -> bool {
        let name = match ev.guest.as_deref() {
            Some(n) => n,
            None => return false,
        };

        let mut state = self.state.write().await;
        let entry = state.entry(name.to_string()).or_insert(GuestState {
            last_seq: 0,
            active: false,
        });

        if ev.seq <= entry.last_seq {
            return false;
        }
        match ev.kind {
            EventKind::GuestJoined => {
                entry.last_seq = ev.seq;
                entry.active = true;
                true
            }
            EventKind::GuestLeft => {
                entry.last_seq = ev.seq;
                entry.active = false;
                true
            }
            _ => {
                entry.last_seq = ev.seq;
                false
            }
        }
    }

    /// Sorted names of guests whose actors are still running.
    pub async fn snapshot(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut active: Vec<String> = state
            .iter()
            .filter(|(_, gs)| gs.active)
            .map(|(name, _)| name.clone())
            .collect();
        active.sort_unstable();
        active
    }

    /// Whether a guest's actor is currently running.
    pub async fn is_active(&self, name: &str) -> bool {
        self.state
            .read()
            .await
            .get(name)
            .map(|gs| gs.active)
            .unwrap_or(false)
    }
}

impl Default for GuestTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for GuestTracker {
    async fn on_event(&self, event: &Event) {
        self.update(event).await;
    }

    fn name(&self) -> &'static str {
        "tracker"
    }
}
