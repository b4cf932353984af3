//! # Exponential backoff between failed attempts.
//!
//! [`BackoffPolicy`] controls how retry delays grow after repeated failures.
//! It is parameterized by:
//! - [`BackoffPolicy::first`] the base delay;
//! - [`BackoffPolicy::factor`] the multiplicative growth factor.
//!
//! The delay for exponent `n` is `first × factor^n`. The runner asks for
//! `next(k - 1)` after the `k`-th failed attempt, so the first retry waits exactly
//! `first`. There is no cap and no jitter: growth is purely exponential.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use taskreflex::BackoffPolicy;
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(100),
//!     factor: 2.0,
//! };
//!
//! // After attempt 1: uses 'first' (100ms)
//! assert_eq!(backoff.next(0), Duration::from_millis(100));
//!
//! // After attempt 2: first × factor^1 = 200ms
//! assert_eq!(backoff.next(1), Duration::from_millis(200));
//!
//! // After attempt 4: first × factor^3 = 800ms
//! assert_eq!(backoff.next(3), Duration::from_millis(800));
//! ```

use std::time::Duration;

/// Retry backoff policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Multiplicative growth factor (must be finite and `> 0`).
    pub factor: f64,
}

impl Default for BackoffPolicy {
    /// Returns a strategy with:
    /// - `first = 1000ms`;
    /// - `factor = 2.0`.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(1000),
            factor: 2.0,
        }
    }
}

impl BackoffPolicy {
    /// Computes the delay for the given exponent (0-indexed).
    ///
    /// # Notes
    /// - If `factor` is less than 1.0, delays shrink with higher exponents (not typical).
    /// - If `factor` equals 1.0, delay remains constant at `first`.
    /// - Results that do not fit a [`Duration`] saturate to [`Duration::MAX`].
    pub fn next(&self, exponent: u32) -> Duration {
        let clamped_exp = exponent.min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(clamped_exp);

        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}
