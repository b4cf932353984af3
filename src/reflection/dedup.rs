//! # Default reflection strategy.
//!
//! [`DedupReflection`] collapses the failures of a run to their distinct messages
//! (first-seen order) and surfaces each one for operator review via `tracing`.
//! It takes no corrective action and never fails.
//!
//! ```text
//! errors: ["timeout", "refused", "timeout", "timeout"]
//!   └─► WARN reflection: 2 distinct errors across 4 failures
//!       WARN reflection: [1] timeout (x3)
//!       WARN reflection: [2] refused (x1)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::strategy::Reflect;
use crate::error::{ReflectionError, TaskError};

/// Distinct messages of `errors`, in first-seen order.
///
/// ```
/// use taskreflex::{unique_messages, TaskError};
///
/// let errors = [TaskError::new("a"), TaskError::new("b"), TaskError::new("a")];
/// assert_eq!(unique_messages(&errors), vec!["a", "b"]);
/// ```
pub fn unique_messages(errors: &[TaskError]) -> Vec<&str> {
    tally(errors).into_iter().map(|(msg, _)| msg).collect()
}

/// Distinct messages with their occurrence counts, in first-seen order.
fn tally(errors: &[TaskError]) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(&str, usize)> = Vec::new();
    for err in errors {
        match index.get(err.message()) {
            Some(&i) => out[i].1 += 1,
            None => {
                index.insert(err.message(), out.len());
                out.push((err.message(), 1));
            }
        }
    }
    out
}

/// Deduplicate-and-report strategy used when none is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DedupReflection;

impl DedupReflection {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reflect for DedupReflection {
    async fn reflect(&self, errors: Arc<[TaskError]>) -> Result<(), ReflectionError> {
        let distinct = tally(&errors);
        warn!(
            "reflection: {} distinct errors across {} failures",
            distinct.len(),
            errors.len()
        );
        for (i, (message, count)) in distinct.iter().enumerate() {
            warn!("reflection: [{}] {} (x{})", i + 1, message, count);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DedupReflection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    fn errs(msgs: &[&str]) -> Vec<TaskError> {
        msgs.iter().map(|m| TaskError::new(*m)).collect()
    }

    #[test]
    fn test_unique_preserves_first_seen_order() {
        let errors = errs(&["timeout", "refused", "timeout", "eof", "refused"]);
        assert_eq!(unique_messages(&errors), vec!["timeout", "refused", "eof"]);
    }

    #[test]
    fn test_unique_ignores_trace() {
        let errors = vec![
            TaskError::new("boom").with_trace("a"),
            TaskError::new("boom").with_trace("b"),
        ];
        assert_eq!(unique_messages(&errors), vec!["boom"]);
    }

    #[test]
    fn test_tally_counts() {
        let errors = errs(&["x", "y", "x", "x"]);
        assert_eq!(tally(&errors), vec![("x", 3), ("y", 1)]);
    }

    /// Collects formatted `tracing` output in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(|l| l.trim().to_string())
                .collect()
        }
    }

    #[tokio::test]
    async fn test_surfaces_each_distinct_message_in_order() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let errors = errs(&["timeout", "refused", "timeout", "timeout"]);
        let res = DedupReflection::new().reflect(Arc::from(errors)).await;
        assert!(res.is_ok());

        let lines = out.lines();
        assert_eq!(
            lines,
            vec![
                "WARN reflection: 2 distinct errors across 4 failures",
                "WARN reflection: [1] timeout (x3)",
                "WARN reflection: [2] refused (x1)",
            ]
        );
    }

    #[tokio::test]
    async fn test_never_fails() {
        let r = DedupReflection::new();
        assert!(r.reflect(Arc::from(Vec::new())).await.is_ok());
        assert!(r.reflect(Arc::from(errs(&["a", "a"]))).await.is_ok());
    }
}
