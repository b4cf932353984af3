//! # Run events emitted by the attempt loop.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **Attempt events**: one attempt's flow (starting, succeeded, failed, backoff)
//! - **Terminal events**: how a run escalated or ended (reflected, reflection exit, failed)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, attempt
//! numbers, the failure of one attempt, or the ordered failures of a whole run.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one runner, events are also delivered in the order they were published.
//!
//! ## Example
//! ```rust
//! use taskreflex::{Event, EventKind, TaskError};
//!
//! let ev = Event::new(EventKind::AttemptFailed)
//!     .with_attempt(3)
//!     .with_error(TaskError::new("boom"));
//!
//! assert_eq!(ev.kind, EventKind::AttemptFailed);
//! assert_eq!(ev.attempt, Some(3));
//! assert_eq!(ev.error.as_ref().map(|e| e.message()), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::error::TaskError;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Attempt events ===
    /// The task is about to be invoked ("before-attempt").
    ///
    /// Sets:
    /// - `attempt`: attempt number (1-based, per run)
    AttemptStarting,

    /// The task invocation completed without failure ("success").
    ///
    /// Sets:
    /// - `attempt`: attempt number
    AttemptSucceeded,

    /// The task invocation failed, after the error was recorded ("error").
    ///
    /// Sets:
    /// - `attempt`: attempt number
    /// - `error`: the failure
    AttemptFailed,

    /// A retry is scheduled; the run suspends right after this event.
    ///
    /// Sets:
    /// - `attempt`: the failed attempt number
    /// - `delay_ms`: delay before the next attempt (ms)
    BackoffScheduled,

    // === Terminal events ===
    /// The reflection strategy completed without failure ("reflection").
    ///
    /// Sets:
    /// - `errors`: ordered failures that triggered reflection
    Reflected,

    /// The loop exits because reflection was entered; state is reset right after
    /// ("reflection-exit").
    ReflectionExit,

    /// Attempts were exhausted without entering reflection ("failure").
    ///
    /// Sets:
    /// - `errors`: ordered failures of the run
    RunFailed,
}

impl EventKind {
    /// Stable channel name of this event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AttemptStarting => "before-attempt",
            EventKind::AttemptSucceeded => "success",
            EventKind::AttemptFailed => "error",
            EventKind::BackoffScheduled => "backoff",
            EventKind::Reflected => "reflection",
            EventKind::ReflectionExit => "reflection-exit",
            EventKind::RunFailed => "failure",
        }
    }
}

/// Run event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Attempt number (starting from 1).
    pub attempt: Option<u32>,
    /// Backoff delay before next attempt in milliseconds.
    pub delay_ms: Option<u64>,
    /// Failure of a single attempt.
    pub error: Option<TaskError>,
    /// Ordered failures of the run (chronological).
    pub errors: Option<Arc<[TaskError]>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            attempt: None,
            delay_ms: None,
            error: None,
            errors: None,
        }
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a backoff delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches the failure of one attempt.
    #[inline]
    pub fn with_error(mut self, err: TaskError) -> Self {
        self.error = Some(err);
        self
    }

    /// Attaches the ordered failures of a run.
    #[inline]
    pub fn with_errors(mut self, errors: impl Into<Arc<[TaskError]>>) -> Self {
        self.errors = Some(errors.into());
        self
    }

    /// Returns the delay as a [`Duration`], if set.
    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }

    /// Returns the attached run failures, or an empty slice.
    #[inline]
    pub fn errors(&self) -> &[TaskError] {
        self.errors.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::AttemptSucceeded | EventKind::ReflectionExit | EventKind::RunFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::AttemptStarting);
        let b = Event::new(EventKind::AttemptStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_payload_builders() {
        let ev = Event::new(EventKind::RunFailed)
            .with_errors(vec![TaskError::new("a"), TaskError::new("b")]);
        assert_eq!(ev.errors().len(), 2);
        assert!(ev.is_terminal());

        let ev = Event::new(EventKind::BackoffScheduled)
            .with_attempt(2)
            .with_delay(Duration::from_millis(1500));
        assert_eq!(ev.delay(), Some(Duration::from_millis(1500)));
        assert!(ev.errors().is_empty());
        assert!(!ev.is_terminal());
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(EventKind::AttemptStarting.as_str(), "before-attempt");
        assert_eq!(EventKind::ReflectionExit.as_str(), "reflection-exit");
        assert_eq!(EventKind::RunFailed.as_str(), "failure");
    }
}
