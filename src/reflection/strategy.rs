//! # Reflection strategy contract.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ReflectionError, TaskError};

/// Shared handle to a strategy.
pub type ReflectRef = Arc<dyn Reflect>;

/// # Escalation procedure run once per run.
///
/// `errors` holds every failure of the run, oldest first.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use taskreflex::{Reflect, ReflectionError, TaskError};
///
/// struct Page;
///
/// #[async_trait]
/// impl Reflect for Page {
///     async fn reflect(&self, errors: Arc<[TaskError]>) -> Result<(), ReflectionError> {
///         if errors.is_empty() {
///             return Err(ReflectionError::failed("nothing to report"));
///         }
///         // notify on-call...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Reflect: Send + Sync + 'static {
    /// Runs the strategy over the ordered failures of a run.
    async fn reflect(&self, errors: Arc<[TaskError]>) -> Result<(), ReflectionError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Closure-backed strategy.
///
/// ```
/// use std::sync::Arc;
/// use taskreflex::{ReflectFn, ReflectRef, ReflectionError, TaskError};
///
/// let r: ReflectRef = ReflectFn::arc(|errors: Arc<[TaskError]>| async move {
///     eprintln!("giving up after {} errors", errors.len());
///     Ok::<_, ReflectionError>(())
/// });
/// ```
pub struct ReflectFn<F> {
    f: F,
}

impl<F, Fut> ReflectFn<F>
where
    F: Fn(Arc<[TaskError]>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ReflectionError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the strategy and returns it as a shared handle.
    pub fn arc(f: F) -> ReflectRef {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Reflect for ReflectFn<F>
where
    F: Fn(Arc<[TaskError]>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ReflectionError>> + Send + 'static,
{
    async fn reflect(&self, errors: Arc<[TaskError]>) -> Result<(), ReflectionError> {
        (self.f)(errors).await
    }

    fn name(&self) -> &'static str {
        "ReflectFn"
    }
}
