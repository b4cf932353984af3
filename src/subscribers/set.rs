//! # SubscriberSet: ordered, synchronous fan-out
//!
//! [`SubscriberSet`] hands each [`Event`](crate::events::Event) to every subscriber
//! in registration order and returns once all of them are done.
//!
//! ## What it guarantees
//! - Every subscriber sees every event, in publish order.
//! - Panics inside subscribers are caught and logged (isolation); the remaining
//!   subscribers still receive the event.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► S1.on_event() ──► (panic? caught, warn)
//!        ├──► S2.on_event()
//!        └──► SN.on_event()
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::events::Event;

use super::Subscribe;

/// Ordered collection of subscribers.
#[derive(Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from the given subscribers.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Appends one subscriber.
    pub fn push(&mut self, sub: Arc<dyn Subscribe>) {
        self.subs.push(sub);
    }

    /// Delivers one event to all subscribers.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subs {
            let res = panic::catch_unwind(AssertUnwindSafe(|| sub.on_event(event)));
            if let Err(payload) = res {
                warn!(
                    subscriber = sub.name(),
                    event = event.kind.as_str(),
                    info = %panic_message(payload.as_ref()),
                    "subscriber panicked"
                );
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

/// Best-effort rendering of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::Mutex;

    #[test]
    fn test_emit_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = {
            let seen = Arc::clone(&seen);
            move |_: &Event| seen.lock().unwrap().push("first")
        };
        let second = {
            let seen = Arc::clone(&seen);
            move |_: &Event| seen.lock().unwrap().push("second")
        };
        let set = SubscriberSet::new(vec![
            Arc::new(first) as Arc<dyn Subscribe>,
            Arc::new(second) as Arc<dyn Subscribe>,
        ]);

        set.emit(&Event::new(EventKind::AttemptStarting));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    struct Boom;

    impl Subscribe for Boom {
        fn on_event(&self, _event: &Event) {
            panic!("listener bug");
        }
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let hits = Arc::new(Mutex::new(0));
        let counter = {
            let hits = Arc::clone(&hits);
            move |_: &Event| *hits.lock().unwrap() += 1
        };
        let set = SubscriberSet::new(vec![
            Arc::new(Boom) as Arc<dyn Subscribe>,
            Arc::new(counter) as Arc<dyn Subscribe>,
        ]);

        set.emit(&Event::new(EventKind::AttemptFailed));
        set.emit(&Event::new(EventKind::AttemptFailed));
        assert_eq!(*hits.lock().unwrap(), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown panic");
    }
}
