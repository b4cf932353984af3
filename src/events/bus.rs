//! # Event bus for run events.
//!
//! [`Bus`] delivers every published [`Event`] to two kinds of consumers:
//!
//! ```text
//! Publisher (one runner):
//!   attempt loop ──┐
//!                  ├──► Bus ──► SubscriberSet ──► sub1.on_event() ─► sub2.on_event() ─► ...
//!   reflection  ───┘      │        (synchronous, in registration order)
//!                         └──► broadcast tap ──► Bus::subscribe() receivers (async)
//! ```
//!
//! ## Rules
//! - **Synchronous delivery**: `publish()` returns only after every registered
//!   subscriber has handled the event, so subscribers observe the run in lock-step.
//! - **No suspension**: `publish()` never awaits; a publish is never a yield point
//!   of the run.
//! - **Fire-and-forget tap**: broadcast receivers are bounded; slow receivers get
//!   `RecvError::Lagged(n)` and skip `n` oldest items. Events are lost if there are
//!   no receivers at send time.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::event::Event;
use crate::subscribers::SubscriberSet;

/// Default capacity of the broadcast tap.
pub const DEFAULT_TAP_CAPACITY: usize = 256;

/// Dispatch point for run events.
///
/// Cheap to clone: subscribers are shared behind an `Arc`, the tap sender is
/// `Arc`-backed.
#[derive(Clone)]
pub struct Bus {
    subscribers: Arc<SubscriberSet>,
    tap: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus over the given subscribers with a tap of `capacity` events.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(subscribers: SubscriberSet, capacity: usize) -> Self {
        let (tap, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self {
            subscribers: Arc::new(subscribers),
            tap,
        }
    }

    /// Publishes an event: subscribers first (in order), then the broadcast tap.
    pub fn publish(&self, ev: Event) {
        self.subscribers.emit(&ev);
        let _ = self.tap.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only gets events **sent after** it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tap.subscribe()
    }

    /// Number of synchronous subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(SubscriberSet::default(), DEFAULT_TAP_CAPACITY)
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("subscribers", &self.subscribers.len())
            .field("tap_receivers", &self.tap.receiver_count())
            .finish()
    }
}
