//! # Error sinks.
//!
//! An [`ErrorSink`] receives one [`ErrorRecord`] per failed attempt, plus one per
//! failed reflection strategy. Sinks are append-only and synchronous: the runner
//! hands the record over and moves on, it never awaits a sink.
//!
//! ## Built-in sinks
//! - [`FileSink`]: JSON lines appended to a file (default: [`DEFAULT_ERROR_LOG`](crate::DEFAULT_ERROR_LOG))
//! - [`TracingSink`]: `tracing::error!` per record
//! - [`MemorySink`]: in-memory buffer, handy for tests and inspection
//!
//! Sinks must not fail the run: I/O problems are logged and swallowed.

mod file;
mod memory;
mod sink;
mod trace;

pub use file::FileSink;
pub use memory::MemorySink;
pub use sink::{ErrorRecord, ErrorSink, RecordSource, SinkRef};
pub use trace::TracingSink;
