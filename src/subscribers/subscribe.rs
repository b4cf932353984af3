//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging event listeners into a runner.
//!
//! ## Contract
//! - Called synchronously from the run, in registration order, at the exact point the
//!   event is published. The next step of the run waits for every subscriber.
//! - Implementations must be quick and must not block on I/O; hand work off to a
//!   channel (or use [`Bus::subscribe`](crate::Bus::subscribe)) for anything slow.
//! - Subscribers never see or mutate run state; they only observe events.
//! - A panic inside `on_event` is caught and logged; the run continues.

use crate::events::Event;

/// Contract for event subscribers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> Subscribe for F
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event) {
        (self)(event)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}
