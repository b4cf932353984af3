//! # Task abstractions.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing the async unit of work
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task<A>>`)

mod task;
mod task_fn;

pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
