//! # Reflection invoker.
//!
//! Runs the configured [`Reflect`] strategy once, when the errors of a run reach the
//! threshold, and contains whatever goes wrong inside it.
//!
//! ## Flow
//! ```text
//! state.enter_reflection()            (always first; the loop exits on it)
//!   └─► strategy.reflect(errors)
//!         ├─ Ok     ─► publish Reflected{errors}
//!         ├─ Err(e) ─► sink.record(reflection e), no Reflected
//!         └─ panic  ─► sink.record(Panicked),     no Reflected
//! ```
//!
//! ## Rules
//! - Never returns an error to the attempt loop
//! - Does not reset the state; the loop does that after `ReflectionExit`

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::{
    core::state::RunState,
    error::{ReflectionError, TaskError},
    events::{Bus, Event, EventKind},
    reflection::Reflect,
    sinks::{ErrorRecord, ErrorSink},
    subscribers::panic_message,
};

/// Enters reflection for the current run and invokes `strategy`.
///
/// Returns the error snapshot handed to the strategy.
pub(crate) async fn reflect(
    state: &mut RunState,
    strategy: &dyn Reflect,
    sink: &dyn ErrorSink,
    bus: &Bus,
) -> Arc<[TaskError]> {
    state.enter_reflection();
    let errors: Arc<[TaskError]> = Arc::from(state.error_log());
    debug!(
        strategy = strategy.name(),
        errors = errors.len(),
        "entering reflection"
    );

    let res = AssertUnwindSafe(strategy.reflect(Arc::clone(&errors)))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            Err(ReflectionError::Panicked {
                info: panic_message(payload.as_ref()),
            })
        });

    match res {
        Ok(()) => {
            bus.publish(Event::new(EventKind::Reflected).with_errors(Arc::clone(&errors)));
        }
        Err(e) => {
            warn!(
                strategy = strategy.name(),
                label = e.as_label(),
                error = %e,
                "reflection strategy failed"
            );
            sink.record(&ErrorRecord::reflection(&e));
        }
    }
    errors
}
