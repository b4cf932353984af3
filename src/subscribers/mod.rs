//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] used by the
//! [`Bus`](crate::Bus) to deliver events, and a built-in [`LogWriter`] (feature `logging`).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Runner ── publish(Event) ──► Bus ──► SubscriberSet::emit(&Event)
//!                                              │
//!                                              ├──► sub1.on_event(&Event)
//!                                              ├──► sub2.on_event(&Event)
//!                                              └──► ... (registration order)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use taskreflex::{Event, EventKind, Subscribe};
//!
//! struct FailureCounter;
//!
//! impl Subscribe for FailureCounter {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::AttemptFailed {
//!             // increment failure counter
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use set::panic_message;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
