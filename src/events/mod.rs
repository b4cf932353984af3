//! Run events: types and dispatch bus.
//!
//! This module groups the event **data model** and the **bus** used to publish
//! run events emitted by the attempt loop and the reflection invoker.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload
//! - [`Bus`] synchronous fan-out to subscribers, plus a broadcast tap
//!
//! ## Quick reference
//! - **Publisher**: `core::runner::Runner` (attempt loop) and `core::reflect` (reflection invoker).
//! - **Consumers**: [`Subscribe`](crate::Subscribe) implementations registered on the
//!   builder (called in order, before the loop continues) and any receiver obtained via
//!   [`Bus::subscribe`].

mod bus;
mod event;

pub(crate) use bus::DEFAULT_TAP_CAPACITY;
pub use bus::Bus;
pub use event::{Event, EventKind};
