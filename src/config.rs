//! # Runner configuration.
//!
//! Provides [`RunnerConfig`]: the numeric knobs of a run sequence. It is resolved
//! once, when the [`Runner`](crate::Runner) is built, and stays immutable afterwards.
//!
//! The caller-supplied collaborators (task, reflection strategy, error sink) are not
//! part of this struct; they are passed to the [`RunnerBuilder`](crate::RunnerBuilder).
//! That keeps `RunnerConfig` plain data: it can be loaded from JSON/YAML with serde.
//!
//! ## Defaults
//! - `max_attempts = 5`
//! - `error_threshold = 3`
//! - `backoff_factor = 2.0`
//! - `initial_delay_ms = 1000`
//!
//! ## Threshold vs attempt cap
//! `error_threshold > max_attempts` is accepted: the threshold simply cannot be reached
//! and every run that keeps failing ends on the attempt cap.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policies::BackoffPolicy;

/// Default path used by [`FileSink::default`](crate::FileSink).
pub const DEFAULT_ERROR_LOG: &str = "logs/taskreflex-errors.log";

/// Numeric configuration of a runner.
///
/// ## Field semantics
/// - `max_attempts`: hard upper bound on attempts per run (`> 0`)
/// - `error_threshold`: accumulated errors that trigger reflection (`> 0`)
/// - `backoff_factor`: multiplicative growth of the retry delay (finite, `> 0`)
/// - `initial_delay_ms`: delay before the first retry, in milliseconds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Maximum number of attempts in one run.
    pub max_attempts: u32,

    /// Number of accumulated errors that triggers reflection.
    ///
    /// Compared only after a failed attempt, against the errors of the current run.
    pub error_threshold: u32,

    /// Growth rate of the retry delay.
    pub backoff_factor: f64,

    /// Base delay before growth is applied (ms).
    pub initial_delay_ms: u64,
}

impl RunnerConfig {
    /// Returns the base retry delay as a [`Duration`].
    #[inline]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Builds the [`BackoffPolicy`] described by this config.
    #[inline]
    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy {
            first: self.initial_delay(),
            factor: self.backoff_factor,
        }
    }

    /// Checks every knob; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if self.error_threshold == 0 {
            return Err(ConfigError::ZeroErrorThreshold);
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor <= 0.0 {
            return Err(ConfigError::InvalidBackoffFactor {
                factor: self.backoff_factor,
            });
        }
        Ok(())
    }

    /// True when the configured threshold can never be reached within one run.
    #[inline]
    pub fn threshold_unreachable(&self) -> bool {
        self.error_threshold > self.max_attempts
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            error_threshold: 3,
            backoff_factor: 2.0,
            initial_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.error_threshold, 3);
        assert_eq!(cfg.backoff_factor, 2.0);
        assert_eq!(cfg.initial_delay(), Duration::from_secs(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: RunnerConfig =
            serde_json::from_str(r#"{ "max_attempts": 4, "error_threshold": 5 }"#).unwrap();
        assert_eq!(cfg.max_attempts, 4);
        assert_eq!(cfg.error_threshold, 5);
        assert_eq!(cfg.initial_delay_ms, 1000);
        assert!(cfg.threshold_unreachable());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let cfg = RunnerConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxAttempts));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let cfg = RunnerConfig {
            error_threshold: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroErrorThreshold));
    }

    #[test]
    fn test_rejects_bad_factor() {
        for factor in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let cfg = RunnerConfig {
                backoff_factor: factor,
                ..Default::default()
            };
            assert!(
                matches!(cfg.validate(), Err(ConfigError::InvalidBackoffFactor { .. })),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn test_backoff_from_config() {
        let cfg = RunnerConfig {
            initial_delay_ms: 250,
            backoff_factor: 3.0,
            ..Default::default()
        };
        let backoff = cfg.backoff();
        assert_eq!(backoff.next(0), Duration::from_millis(250));
        assert_eq!(backoff.next(2), Duration::from_millis(2250));
    }
}
