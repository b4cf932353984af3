//! Runner core: attempt loop, run state and reflection.
//!
//! The public API from this module is [`Runner`] (built with [`RunnerBuilder`]),
//! the [`RunState`] it exposes for inspection and the [`RunOutcome`] of a run.
//!
//! Internal modules:
//! - [`runner`]: the attempt loop (backoff, escalation, exit handling);
//! - [`reflect`]: runs the reflection strategy once and contains its failures;
//! - [`state`]: attempt counter, error log and reflection flag;
//! - [`builder`]: resolves caller options against defaults and validates them.

mod builder;
mod reflect;
mod runner;
mod state;

pub use builder::RunnerBuilder;
pub use runner::{RunOutcome, Runner};
pub use state::RunState;
