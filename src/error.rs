//! Error types used by the runner, tasks and reflection strategies.
//!
//! This module defines three error types:
//!
//! - [`ConfigError`]: raised by [`RunnerBuilder::build`](crate::RunnerBuilder::build);
//!   the only error that ever reaches the caller.
//! - [`TaskError`]: an opaque failure of the caller-supplied task. Accumulated, recorded
//!   and published, never transformed.
//! - [`ReflectionError`]: a failure of the reflection strategy. Contained by the runner and
//!   only forwarded to the error sink.
//!
//! All of them provide `as_label` (stable snake_case label for logs).

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// # Errors produced while validating a runner configuration.
///
/// Fatal: no [`Runner`](crate::Runner) is produced.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No task was supplied to the builder.
    #[error("a task is required")]
    MissingTask,

    /// `max_attempts` must allow at least one attempt.
    #[error("max_attempts must be positive")]
    ZeroMaxAttempts,

    /// `error_threshold` must be at least one error.
    #[error("error_threshold must be positive")]
    ZeroErrorThreshold,

    /// `backoff_factor` must be a finite number greater than zero.
    #[error("backoff_factor must be a positive finite number, got {factor}")]
    InvalidBackoffFactor {
        /// The rejected factor.
        factor: f64,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use taskreflex::ConfigError;
    ///
    /// assert_eq!(ConfigError::MissingTask.as_label(), "config_missing_task");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingTask => "config_missing_task",
            ConfigError::ZeroMaxAttempts => "config_zero_max_attempts",
            ConfigError::ZeroErrorThreshold => "config_zero_error_threshold",
            ConfigError::InvalidBackoffFactor { .. } => "config_invalid_backoff_factor",
        }
    }
}

/// # Opaque failure of a single task attempt.
///
/// Carries a human-readable `message` and an optional `trace`. Two task errors are
/// considered equal when their messages are equal; the trace is ignored.
///
/// # Example
/// ```
/// use taskreflex::TaskError;
///
/// let a = TaskError::new("connection refused").with_trace("at connect()");
/// let b = TaskError::from("connection refused");
/// assert_eq!(a, b);
/// assert_eq!(a.trace(), Some("at connect()"));
/// ```
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TaskError {
    message: Arc<str>,
    trace: Option<Arc<str>>,
}

impl TaskError {
    /// Creates an error with the given message and no trace.
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Attaches a trace (stack, source chain, context lines...).
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<Arc<str>>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Captures any [`std::error::Error`]: its display becomes the message and the
    /// chain of sources becomes the trace.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(s) = source {
            chain.push(format!("caused by: {s}"));
            source = s.source();
        }
        let e = Self::new(err.to_string());
        if chain.is_empty() {
            e
        } else {
            e.with_trace(chain.join("\n"))
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace attached to the failure, if any.
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        "task_failed"
    }
}

impl PartialEq for TaskError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for TaskError {}

impl From<&str> for TaskError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for TaskError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// # Errors produced by a reflection strategy.
///
/// Never propagated: the runner records them through the error sink and carries on.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    /// The strategy returned an error.
    #[error("reflection failed: {message}")]
    Failed {
        /// The underlying error message.
        message: String,
    },

    /// The strategy panicked while running.
    #[error("reflection panicked: {info}")]
    Panicked {
        /// Panic payload, when it was a string.
        info: String,
    },
}

impl ReflectionError {
    /// Shorthand for [`ReflectionError::Failed`].
    pub fn failed(message: impl fmt::Display) -> Self {
        ReflectionError::Failed {
            message: message.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ReflectionError::Failed { .. } => "reflection_failed",
            ReflectionError::Panicked { .. } => "reflection_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn test_equality_ignores_trace() {
        let a = TaskError::new("boom").with_trace("one");
        let b = TaskError::new("boom").with_trace("two");
        assert_eq!(a, b);
        assert_ne!(a, TaskError::new("bang"));
    }

    #[test]
    fn test_from_error_captures_source_chain() {
        let err = Outer { inner: Inner };
        let captured = TaskError::from_error(&err);
        assert_eq!(captured.message(), "outer");
        assert_eq!(captured.trace(), Some("caused by: inner"));
    }

    #[test]
    fn test_from_error_without_source_has_no_trace() {
        let captured = TaskError::from_error(&Inner);
        assert_eq!(captured.message(), "inner");
        assert!(captured.trace().is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            ConfigError::InvalidBackoffFactor { factor: 0.0 }.as_label(),
            "config_invalid_backoff_factor"
        );
        assert_eq!(ReflectionError::failed("x").as_label(), "reflection_failed");
        assert_eq!(TaskError::new("x").as_label(), "task_failed");
    }
}
