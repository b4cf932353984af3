//! # Error sink contract and record type.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{ReflectionError, TaskError};

/// Shared handle to a sink.
pub type SinkRef = Arc<dyn ErrorSink>;

/// Append-only destination for error records.
pub trait ErrorSink: Send + Sync + 'static {
    /// Appends one record. Must not block for long and must not panic.
    fn record(&self, record: &ErrorRecord);
}

/// What produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// A failed task attempt.
    Task,
    /// A failed reflection strategy.
    Reflection,
}

/// Structured error record.
///
/// `attempt` is `None` for reflection failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Unix timestamp in milliseconds.
    pub at_ms: u64,
    pub source: RecordSource,
    pub attempt: Option<u32>,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trace: String,
}

impl ErrorRecord {
    /// Record for a failed attempt.
    pub fn attempt(attempt: u32, err: &TaskError) -> Self {
        Self {
            at_ms: now_ms(),
            source: RecordSource::Task,
            attempt: Some(attempt),
            message: err.message().to_string(),
            trace: err.trace().unwrap_or_default().to_string(),
        }
    }

    /// Record for a failed reflection strategy.
    pub fn reflection(err: &ReflectionError) -> Self {
        Self {
            at_ms: now_ms(),
            source: RecordSource::Reflection,
            attempt: None,
            message: err.to_string(),
            trace: String::new(),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_record_carries_trace() {
        let err = TaskError::new("refused").with_trace("at dial()");
        let rec = ErrorRecord::attempt(2, &err);
        assert_eq!(rec.source, RecordSource::Task);
        assert_eq!(rec.attempt, Some(2));
        assert_eq!(rec.message, "refused");
        assert_eq!(rec.trace, "at dial()");
    }

    #[test]
    fn test_reflection_record_has_no_attempt() {
        let rec = ErrorRecord::reflection(&ReflectionError::failed("no llm"));
        assert_eq!(rec.source, RecordSource::Reflection);
        assert_eq!(rec.attempt, None);
        assert_eq!(rec.message, "reflection failed: no llm");
    }

    #[test]
    fn test_json_shape() {
        let rec = ErrorRecord::attempt(1, &TaskError::new("boom"));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["source"], "task");
        assert_eq!(json["attempt"], 1);
        assert!(json.get("trace").is_none());
    }
}
