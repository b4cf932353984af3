//! # Task abstraction.
//!
//! This module defines the [`Task`] trait: the caller-supplied, asynchronous unit of
//! work driven by a [`Runner`](crate::Runner). The common handle type is [`TaskRef`],
//! an `Arc<dyn Task<A>>`.
//!
//! `A` is the argument type forwarded to every attempt. Use `()` for a task without
//! arguments and a tuple for several.
//!
//! There is no timeout and no cancellation: a task that never completes holds its
//! run forever. Wrap the task (e.g. with `tokio::time::timeout`) to bound it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;

/// Shared handle to a task.
pub type TaskRef<A = ()> = Arc<dyn Task<A>>;

/// # Asynchronous unit of work.
///
/// A `Task` has a stable [`name`](Task::name) and an async [`run`](Task::run) method that
/// receives the arguments of the current attempt.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskreflex::{Task, TaskError};
///
/// struct Fetch;
///
/// #[async_trait]
/// impl Task<String> for Fetch {
///     fn name(&self) -> &str { "fetch" }
///
///     async fn run(&self, url: String) -> Result<(), TaskError> {
///         if url.is_empty() {
///             return Err(TaskError::new("empty url"));
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task<A>: Send + Sync + 'static
where
    A: Send + 'static,
{
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes one attempt.
    async fn run(&self, args: A) -> Result<(), TaskError>;
}
