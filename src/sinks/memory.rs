//! # In-memory sink.

use std::sync::Mutex;

use super::sink::{ErrorRecord, ErrorSink};

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for MemorySink {
    fn record(&self, record: &ErrorRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}
