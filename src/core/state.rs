//! # Mutable state of a run.
//!
//! [`RunState`] is owned by exactly one [`Runner`](crate::Runner) and only the attempt
//! loop (and the reflection invoker it calls) mutates it. Subscribers and strategies
//! never see it.
//!
//! ## Invariants
//! - `attempt_count <= max_attempts`
//! - `error_log.len() <= attempt_count` (at most one error per attempt)
//! - `reflecting` flips to `true` at most once per run, only from the failure branch
//! - [`RunState::reset`] replaces the whole value at once; there is no partial reset
//!
//! ## Lifecycle
//! ```text
//! new()            ─► { 0, [], false }
//! run: success     ─► left as is (errors of earlier attempts stay visible)
//! run: exhausted   ─► left as is (caller may inspect error_log)
//! run: reflection  ─► reset() ─► { 0, [], false }
//! ```

use crate::error::TaskError;

/// Attempt counter, ordered error log and reflection flag of the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    attempt_count: u32,
    error_log: Vec<TaskError>,
    reflecting: bool,
}

impl RunState {
    /// Fresh state: no attempts, no errors, not reflecting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts consumed so far.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Failures of the run, oldest first.
    pub fn error_log(&self) -> &[TaskError] {
        &self.error_log
    }

    /// Number of recorded failures.
    pub fn error_count(&self) -> usize {
        self.error_log.len()
    }

    /// True once reflection was entered for the current run.
    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    /// Starts the next attempt and returns its number (1-based).
    pub(crate) fn begin_attempt(&mut self) -> u32 {
        self.attempt_count += 1;
        self.attempt_count
    }

    pub(crate) fn push_error(&mut self, err: TaskError) {
        debug_assert!(self.error_log.len() < self.attempt_count as usize);
        self.error_log.push(err);
    }

    pub(crate) fn enter_reflection(&mut self) {
        self.reflecting = true;
    }

    /// Reinitializes every field at once.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempts_and_errors() {
        let mut st = RunState::new();
        assert_eq!(st.begin_attempt(), 1);
        st.push_error(TaskError::new("a"));
        assert_eq!(st.begin_attempt(), 2);
        st.push_error(TaskError::new("b"));

        assert_eq!(st.attempt_count(), 2);
        assert_eq!(st.error_count(), 2);
        assert_eq!(st.error_log()[0].message(), "a");
        assert!(!st.is_reflecting());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut st = RunState::new();
        st.begin_attempt();
        st.push_error(TaskError::new("a"));
        st.enter_reflection();
        assert!(st.is_reflecting());

        st.reset();
        assert_eq!(st, RunState::new());
    }
}
