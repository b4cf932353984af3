//! # Reflection strategies.
//!
//! Reflection is the one-shot escalation a runner performs once the errors of a run
//! reach the configured threshold. The strategy receives the ordered failures of the
//! run; what it does with them (summarise, alert, ask a model, open a ticket) is up to
//! the caller.
//!
//! ## Contents
//! - [`Reflect`] - trait for implementing a strategy
//! - [`ReflectFn`] - closure-backed strategy
//! - [`ReflectRef`] - shared handle (`Arc<dyn Reflect>`)
//! - [`DedupReflection`] - default strategy: deduplicate messages, surface for review
//!
//! A strategy may fail or even panic; either way the runner contains it, records it
//! through the error sink and ends the run normally.

mod dedup;
mod strategy;

pub use dedup::{unique_messages, DedupReflection};
pub use strategy::{Reflect, ReflectFn, ReflectRef};
