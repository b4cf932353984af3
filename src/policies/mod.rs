//! Retry policies.
//!
//! This module groups the knobs that control **how long** to wait between attempts.
//! Whether another attempt happens at all is decided by the runner (attempt cap and
//! reflection threshold, see [`RunnerConfig`](crate::RunnerConfig)).
//!
//! ## Contents
//! - [`BackoffPolicy`] how retry delays evolve (first × factor^n)
//!
//! ## Quick wiring
//! ```text
//! RunnerConfig { initial_delay_ms, backoff_factor, .. }
//!      └─► RunnerConfig::backoff() ─► BackoffPolicy
//!           └─► core::runner uses backoff.next(attempt - 1) after a failed attempt
//! ```
//!
//! ## Defaults
//! - `BackoffPolicy::default()` → first=1000ms, factor=2.0.

mod backoff;

pub use backoff::BackoffPolicy;
