//! # Tracing sink.

use tracing::error;

use super::sink::{ErrorRecord, ErrorSink};

/// Emits each record as a `tracing::error!` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, record: &ErrorRecord) {
        error!(
            source = ?record.source,
            attempt = ?record.attempt,
            trace = %record.trace,
            "{}",
            record.message
        );
    }
}
