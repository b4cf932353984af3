use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    config::RunnerConfig,
    error::{ConfigError, ReflectionError, TaskError},
    events::{Bus, DEFAULT_TAP_CAPACITY},
    reflection::{DedupReflection, ReflectFn, ReflectRef},
    sinks::{FileSink, SinkRef},
    subscribers::{Subscribe, SubscriberSet},
    tasks::{TaskFn, TaskRef},
};

use super::{runner::Runner, state::RunState};

/// Builder for constructing a [`Runner`].
///
/// Everything except the task has a default:
/// - numeric knobs from [`RunnerConfig::default`]
/// - reflection: [`DedupReflection`]
/// - error sink: [`FileSink::default`] (`logs/taskreflex-errors.log`)
/// - no subscribers
pub struct RunnerBuilder<A = ()> {
    task: Option<TaskRef<A>>,
    cfg: RunnerConfig,
    reflection: Option<ReflectRef>,
    sink: Option<SinkRef>,
    subscribers: SubscriberSet,
    tap_capacity: usize,
}

impl<A> RunnerBuilder<A>
where
    A: Clone + Send + 'static,
{
    /// Creates an empty builder with default configuration.
    pub fn new() -> Self {
        Self {
            task: None,
            cfg: RunnerConfig::default(),
            reflection: None,
            sink: None,
            subscribers: SubscriberSet::default(),
            tap_capacity: DEFAULT_TAP_CAPACITY,
        }
    }

    /// Sets the task to run.
    pub fn task(mut self, task: TaskRef<A>) -> Self {
        self.task = Some(task);
        self
    }

    /// Sets the task from a closure (see [`TaskFn`]).
    pub fn task_fn<F, Fut>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.task(TaskFn::arc(name, f))
    }

    /// Replaces all numeric knobs at once.
    pub fn config(mut self, cfg: RunnerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Hard cap on attempts per run (`> 0`).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.cfg.max_attempts = n;
        self
    }

    /// Accumulated errors that trigger reflection (`> 0`).
    ///
    /// A value above `max_attempts` is accepted but can never be reached.
    pub fn error_threshold(mut self, n: u32) -> Self {
        self.cfg.error_threshold = n;
        self
    }

    /// Growth rate of the retry delay (finite, `> 0`).
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.cfg.backoff_factor = factor;
        self
    }

    /// Base delay before the first retry (millisecond precision).
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.cfg.initial_delay_ms = delay.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Sets the reflection strategy.
    pub fn reflection(mut self, strategy: ReflectRef) -> Self {
        self.reflection = Some(strategy);
        self
    }

    /// Sets the reflection strategy from a closure (see [`ReflectFn`]).
    pub fn reflect_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Arc<[TaskError]>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ReflectionError>> + Send + 'static,
    {
        self.reflection(ReflectFn::arc(f))
    }

    /// Sets the error sink.
    pub fn error_sink(mut self, sink: SinkRef) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Adds one synchronous event subscriber.
    pub fn subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Sets event subscribers, replacing any added before.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = SubscriberSet::new(subscribers);
        self
    }

    /// Capacity of the broadcast tap behind [`Runner::subscribe`] (min 1).
    pub fn tap_capacity(mut self, capacity: usize) -> Self {
        self.tap_capacity = capacity;
        self
    }

    /// Validates the configuration and returns the runner.
    ///
    /// # Errors
    /// - [`ConfigError::MissingTask`] when no task was set
    /// - any error from [`RunnerConfig::validate`]
    pub fn build(self) -> Result<Runner<A>, ConfigError> {
        let task = self.task.ok_or(ConfigError::MissingTask)?;
        self.cfg.validate()?;

        let reflection = self
            .reflection
            .unwrap_or_else(|| Arc::new(DedupReflection::new()));
        let sink = self.sink.unwrap_or_else(|| Arc::new(FileSink::default()));
        let bus = Bus::new(self.subscribers, self.tap_capacity);

        if self.cfg.threshold_unreachable() {
            warn!(
                task = task.name(),
                max_attempts = self.cfg.max_attempts,
                error_threshold = self.cfg.error_threshold,
                "error threshold exceeds attempt cap; reflection will never run"
            );
        }

        debug!(
            task = task.name(),
            max_attempts = self.cfg.max_attempts,
            error_threshold = self.cfg.error_threshold,
            backoff_factor = self.cfg.backoff_factor,
            initial_delay_ms = self.cfg.initial_delay_ms,
            reflection = reflection.name(),
            subscribers = bus.subscriber_count(),
            "runner built"
        );

        Ok(Runner {
            task,
            backoff: self.cfg.backoff(),
            cfg: self.cfg,
            reflection,
            sink,
            bus,
            state: RunState::new(),
        })
    }
}

impl<A> Default for RunnerBuilder<A>
where
    A: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
