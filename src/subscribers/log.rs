//! # LogWriter: event printer
//!
//! A minimal subscriber that renders incoming [`Event`]s as `tracing` records.
//! Use it for demos or while wiring a runner up.
//!
//! ## Example output
//! ```text
//! INFO  [before-attempt] attempt=1
//! WARN  [error] attempt=1 err="connection refused"
//! INFO  [backoff] after_attempt=1 delay_ms=1000
//! INFO  [success] attempt=2
//! WARN  [reflection] errors=3
//! INFO  [reflection-exit]
//! ERROR [failure] errors=5
//! ```

use tracing::{error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let tag = e.kind.as_str();
        match e.kind {
            EventKind::AttemptStarting | EventKind::AttemptSucceeded => {
                info!("[{tag}] attempt={:?}", e.attempt);
            }
            EventKind::AttemptFailed => {
                warn!(
                    "[{tag}] attempt={:?} err={:?}",
                    e.attempt,
                    e.error.as_ref().map(|err| err.message())
                );
            }
            EventKind::BackoffScheduled => {
                info!("[{tag}] after_attempt={:?} delay_ms={:?}", e.attempt, e.delay_ms);
            }
            EventKind::Reflected => {
                warn!("[{tag}] errors={}", e.errors().len());
            }
            EventKind::ReflectionExit => {
                info!("[{tag}]");
            }
            EventKind::RunFailed => {
                error!("[{tag}] errors={}", e.errors().len());
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
