//! # taskreflex
//!
//! **taskreflex** runs one async task under a bounded-retry policy with exponential
//! backoff, and escalates to a one-shot *reflection* procedure once the failures of a
//! run reach a threshold. It is a control-flow primitive to embed in larger systems,
//! not an orchestrator.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  RunnerConfig ──► RunnerBuilder::build() ──► Runner
//!                         │                       │ owns
//!        Task, Reflect, ErrorSink, Subscribe      ▼
//!                                              RunState { attempt_count, error_log, reflecting }
//!
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Runner::run_task(args)  (attempt loop)                           │
//! │   ├─► Task::run(args)              one attempt                    │
//! │   ├─► ErrorSink::record(..)        one record per failure         │
//! │   ├─► Bus::publish(Event)          synchronous, in order          │
//! │   └─► reflect()                    once, at the error threshold   │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                    Bus ──► SubscriberSet ──► sub1, sub2, ... (sync)
//!                     └────► broadcast tap ──► Runner::subscribe() (async)
//! ```
//!
//! ### Lifecycle
//! ```text
//! while attempt_count < max_attempts && !reflecting {
//!   ├─► attempt += 1, publish AttemptStarting{attempt}
//!   ├─► task.run(args)
//!   │       ├─ Ok  ──► publish AttemptSucceeded{attempt}, return (no reset)
//!   │       └─ Err ──► log error, sink.record, publish AttemptFailed{attempt, error}
//!   │                  ├─ errors >= error_threshold ─► reflection (sets reflecting)
//!   │                  │     ├─ strategy Ok  ─► publish Reflected{errors}
//!   │                  │     └─ strategy Err ─► sink.record (contained)
//!   │                  └─ else ─► publish BackoffScheduled, sleep(initial × factor^(attempt-1))
//! }
//! ├─ reflecting ─► publish ReflectionExit, reset state
//! └─ exhausted  ─► publish RunFailed{errors}, state kept for inspection
//! ```
//!
//! The asymmetry at the end is deliberate: after an exhausted run the caller can still
//! read [`RunState::error_log`]; after a reflection run the errors are only available
//! from the `Reflected` event or the returned [`RunOutcome`].
//!
//! ## Features
//! | Area              | Description                                             | Key types / traits                          |
//! |-------------------|---------------------------------------------------------|---------------------------------------------|
//! | **Runner**        | Attempt loop, run state, outcome.                       | [`Runner`], [`RunState`], [`RunOutcome`]    |
//! | **Configuration** | Numeric knobs with defaults, serde-friendly.            | [`RunnerConfig`], [`RunnerBuilder`]         |
//! | **Policies**      | Exponential delay between failed attempts.              | [`BackoffPolicy`]                           |
//! | **Tasks**         | Define the unit of work as a trait impl or a closure.   | [`Task`], [`TaskFn`], [`TaskRef`]           |
//! | **Reflection**    | Escalation strategy and the default dedup strategy.     | [`Reflect`], [`ReflectFn`], [`DedupReflection`] |
//! | **Error sinks**   | Append-only structured error records.                   | [`ErrorSink`], [`FileSink`], [`MemorySink`] |
//! | **Events**        | Named lifecycle notifications.                          | [`Event`], [`EventKind`], [`Subscribe`]     |
//! | **Errors**        | Typed errors for configuration, tasks and reflection.   | [`ConfigError`], [`TaskError`], [`ReflectionError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use taskreflex::{MemorySink, RunOutcome, Runner, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(MemorySink::new());
//!
//!     let mut runner = Runner::builder()
//!         .task_fn("ping", |host: &'static str| async move {
//!             if host.is_empty() {
//!                 return Err(TaskError::new("no host"));
//!             }
//!             Ok(())
//!         })
//!         .max_attempts(5)
//!         .error_threshold(3)
//!         .initial_delay(Duration::from_millis(10))
//!         .error_sink(sink.clone())
//!         .build()?;
//!
//!     let outcome = runner.run_task("example.org").await;
//!     assert_eq!(outcome, RunOutcome::Succeeded { attempt: 1 });
//!     assert!(sink.is_empty());
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod policies;
mod reflection;
mod sinks;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::{RunnerConfig, DEFAULT_ERROR_LOG};
pub use crate::core::{RunOutcome, RunState, Runner, RunnerBuilder};
pub use error::{ConfigError, ReflectionError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use policies::BackoffPolicy;
pub use reflection::{unique_messages, DedupReflection, Reflect, ReflectFn, ReflectRef};
pub use sinks::{ErrorRecord, ErrorSink, FileSink, MemorySink, RecordSource, SinkRef, TracingSink};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskRef};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
