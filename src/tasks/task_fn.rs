//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(A) -> Fut`, producing a fresh future per attempt.
//! There is no hidden state between attempts; if the closure needs shared state
//! (counters, connections), capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use taskreflex::{TaskFn, TaskRef, TaskError};
//!
//! let t: TaskRef<u32> = TaskFn::arc("square", |n: u32| async move {
//!     if n.checked_mul(n).is_none() {
//!         return Err(TaskError::new("overflow"));
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(t.name(), "square");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::task::{Task, TaskRef};

/// Function-backed task implementation.
///
/// Wraps a closure that *creates* a new future per attempt.
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle (`Arc<dyn Task<A>>`).
    pub fn arc<A>(name: impl Into<Cow<'static, str>>, f: F) -> TaskRef<A>
    where
        A: Send + 'static,
        Self: Task<A>,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<F> std::fmt::Debug for TaskFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskFn").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<A, F, Fut> Task<A> for TaskFn<F>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, args: A) -> Result<(), TaskError> {
        (self.f)(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_forwards_arguments() {
        let t: TaskRef<(u32, &'static str)> =
            TaskFn::arc("pair", |(n, s): (u32, &'static str)| async move {
                if n == 7 && s == "seven" {
                    Ok(())
                } else {
                    Err(TaskError::new(format!("unexpected {n} {s}")))
                }
            });

        assert!(t.run((7, "seven")).await.is_ok());
        assert_eq!(t.run((1, "one")).await.unwrap_err().message(), "unexpected 1 one");
    }

    #[tokio::test]
    async fn test_fresh_future_per_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let t: TaskRef = TaskFn::arc("count", move |()| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TaskError>(())
            }
        });

        for _ in 0..3 {
            t.run(()).await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(t.name(), "count");
    }
}
