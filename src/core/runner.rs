//! # Runner: the attempt loop.
//!
//! Drives one [`Task`](crate::Task) through sequential attempts with:
//! - a hard cap on attempts per run,
//! - exponential delays between failed attempts ([`BackoffPolicy`]),
//! - one-shot escalation to reflection once errors reach the threshold.
//!
//! ## Event flow
//! For each attempt, the runner publishes:
//! ```text
//! AttemptStarting → [task execution] → AttemptSucceeded           (run ends)
//!                                    → AttemptFailed
//!                                        ├─ errors >= threshold → [reflection] → Reflected?
//!                                        └─ otherwise           → BackoffScheduled → [sleep]
//! ```
//!
//! ## Architecture
//! ```text
//! Runner::run_task(args)
//!
//! while attempt_count < max_attempts && !reflecting {
//!   ├─► attempt = state.begin_attempt()
//!   ├─► publish AttemptStarting{attempt}
//!   ├─► task.run(args.clone()).await
//!   │       │
//!   │       ├─ Ok  ──► publish AttemptSucceeded{attempt}, return Succeeded
//!   │       │
//!   │       └─ Err ──► error_log.push(err)
//!   │                  sink.record(attempt, err)
//!   │                  publish AttemptFailed{attempt, err}
//!   │                  ├─ error_log.len() >= error_threshold ─► reflect() (sets reflecting)
//!   │                  └─ else:
//!   │                       ├─ delay = backoff.next(attempt - 1)
//!   │                       ├─ publish BackoffScheduled{attempt, delay}
//!   │                       └─ sleep(delay)
//! }
//!
//! exit:
//!   ├─ reflecting ─► publish ReflectionExit, reset state, return Reflected
//!   └─ otherwise  ─► publish RunFailed{error_log}, keep state, return Exhausted
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**; attempt `n + 1` starts after attempt `n` was
//!   recorded, published and (if needed) slept on
//! - The run suspends only while awaiting the task, the backoff timer, or the
//!   reflection strategy; publishing and recording never suspend
//! - No timeout and no cancellation: a hung task holds the run
//! - State is reset **only** after a reflection run; an exhausted run keeps its
//!   errors so the caller can inspect them

use std::sync::Arc;

use tokio::{sync::broadcast, time};
use tracing::{debug, info};

use crate::{
    config::RunnerConfig,
    core::{builder::RunnerBuilder, reflect::reflect, state::RunState},
    error::TaskError,
    events::{Bus, Event, EventKind},
    policies::BackoffPolicy,
    reflection::ReflectRef,
    sinks::{ErrorRecord, SinkRef},
    tasks::TaskRef,
};

/// How a call to [`Runner::run_task`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// An attempt succeeded.
    Succeeded {
        /// Number of the successful attempt.
        attempt: u32,
    },
    /// Attempts ran out before the threshold was reached.
    ///
    /// The errors are also still available through [`Runner::state`].
    Exhausted {
        /// Ordered failures of the run.
        errors: Arc<[TaskError]>,
    },
    /// The threshold was reached; reflection ran and the state was reset.
    Reflected {
        /// Ordered failures handed to the reflection strategy.
        errors: Arc<[TaskError]>,
    },
}

impl RunOutcome {
    /// True when an attempt of the run succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded { .. })
    }

    /// Failures carried by the outcome (empty on success).
    pub fn errors(&self) -> &[TaskError] {
        match self {
            RunOutcome::Succeeded { .. } => &[],
            RunOutcome::Exhausted { errors } | RunOutcome::Reflected { errors } => errors,
        }
    }
}

/// Bounded-retry runner for a single task.
///
/// ### Responsibilities
/// - **Execution**: invokes the task with the same arguments on every attempt
/// - **Bookkeeping**: owns the [`RunState`] of the current run
/// - **Backoff**: sleeps `initial_delay × factor^(attempt - 1)` after a failure
/// - **Escalation**: hands the errors to the reflection strategy at the threshold
/// - **Event publishing**: reports every step to the [`Bus`]
///
/// `run_task` takes `&mut self`, so one runner never runs two loops at once.
/// Independent work needs independent runners.
pub struct Runner<A = ()> {
    pub(crate) task: TaskRef<A>,
    pub(crate) cfg: RunnerConfig,
    pub(crate) backoff: BackoffPolicy,
    pub(crate) reflection: ReflectRef,
    pub(crate) sink: SinkRef,
    pub(crate) bus: Bus,
    pub(crate) state: RunState,
}

impl<A> Runner<A>
where
    A: Clone + Send + 'static,
{
    /// Starts building a runner.
    pub fn builder() -> RunnerBuilder<A> {
        RunnerBuilder::new()
    }

    /// Runs the task until it succeeds, attempts run out, or reflection ends the run.
    ///
    /// `args` is cloned for every attempt.
    ///
    /// A runner keeps its state between calls unless the previous run went through
    /// reflection: calling again after an exhausted run finds the attempt budget already
    /// spent and immediately reports `RunFailed` again with the retained errors.
    pub async fn run_task(&mut self, args: A) -> RunOutcome {
        let name = self.task.name().to_owned();
        let max_attempts = self.cfg.max_attempts;
        let threshold = self.cfg.error_threshold as usize;
        let mut reflected: Option<Arc<[TaskError]>> = None;

        while self.state.attempt_count() < max_attempts && !self.state.is_reflecting() {
            let attempt = self.state.begin_attempt();
            self.bus
                .publish(Event::new(EventKind::AttemptStarting).with_attempt(attempt));
            debug!(task = %name, attempt, "attempt starting");

            match self.task.run(args.clone()).await {
                Ok(()) => {
                    self.bus
                        .publish(Event::new(EventKind::AttemptSucceeded).with_attempt(attempt));
                    debug!(task = %name, attempt, "attempt succeeded");
                    return RunOutcome::Succeeded { attempt };
                }
                Err(err) => {
                    debug!(task = %name, attempt, error = %err, "attempt failed");
                    self.state.push_error(err.clone());
                    self.sink.record(&ErrorRecord::attempt(attempt, &err));
                    self.bus.publish(
                        Event::new(EventKind::AttemptFailed)
                            .with_attempt(attempt)
                            .with_error(err),
                    );

                    if self.state.error_count() >= threshold {
                        let errors = reflect(
                            &mut self.state,
                            self.reflection.as_ref(),
                            self.sink.as_ref(),
                            &self.bus,
                        )
                        .await;
                        reflected = Some(errors);
                    } else {
                        let delay = self.backoff.next(attempt - 1);
                        self.bus.publish(
                            Event::new(EventKind::BackoffScheduled)
                                .with_attempt(attempt)
                                .with_delay(delay),
                        );
                        debug!(task = %name, attempt, ?delay, "backoff scheduled");
                        time::sleep(delay).await;
                    }
                }
            }
        }

        if self.state.is_reflecting() {
            let errors = reflected.unwrap_or_else(|| Arc::from(self.state.error_log()));
            self.bus.publish(Event::new(EventKind::ReflectionExit));
            self.state.reset();
            info!(task = %name, errors = errors.len(), "run ended after reflection");
            RunOutcome::Reflected { errors }
        } else {
            let errors: Arc<[TaskError]> = Arc::from(self.state.error_log());
            self.bus
                .publish(Event::new(EventKind::RunFailed).with_errors(Arc::clone(&errors)));
            info!(task = %name, errors = errors.len(), "run failed: attempts exhausted");
            RunOutcome::Exhausted { errors }
        }
    }
}

impl<A: Send + 'static> Runner<A> {
    /// State of the current (or last) run.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Resolved configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.cfg
    }

    /// Event bus of this runner.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Shorthand for `bus().subscribe()`.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Name of the supervised task.
    pub fn task_name(&self) -> &str {
        self.task.name()
    }

    /// Discards the current state (attempts, errors, reflection flag) at once.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl<A: Send + 'static> std::fmt::Debug for Runner<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("task", &self.task.name())
            .field("cfg", &self.cfg)
            .field("reflection", &self.reflection.name())
            .field("state", &self.state)
            .finish()
    }
}
