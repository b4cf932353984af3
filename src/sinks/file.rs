//! # File sink.
//!
//! Appends one JSON object per line:
//! ```text
//! {"at_ms":1760000000000,"source":"task","attempt":1,"message":"connection refused"}
//! {"at_ms":1760000003000,"source":"reflection","attempt":null,"message":"reflection failed: ..."}
//! ```
//!
//! The file (and its parent directory) is created on first write. Each record is a
//! single `write_all` under a lock, so lines never interleave within one process.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::sink::{ErrorRecord, ErrorSink};
use crate::config::DEFAULT_ERROR_LOG;

/// JSON-lines file sink.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    /// Creates a sink writing to `path`. Nothing is opened until the first record.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %self.path.display(), "opening error log");
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn append(&self, record: &ErrorRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
        line.push(b'\n');

        let mut guard = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        match guard.as_mut() {
            Some(file) => file.write_all(&line),
            None => Ok(()),
        }
    }
}

impl Default for FileSink {
    /// Sink writing to [`DEFAULT_ERROR_LOG`].
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

impl ErrorSink for FileSink {
    fn record(&self, record: &ErrorRecord) {
        if let Err(e) = self.append(record) {
            warn!(
                path = %self.path.display(),
                error = %e,
                message = %record.message,
                "failed to append error record"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReflectionError, TaskError};
    use crate::sinks::RecordSource;
    use tempfile::TempDir;

    #[test]
    fn test_appends_json_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("errors.log");
        let sink = FileSink::new(&path);

        sink.record(&ErrorRecord::attempt(1, &TaskError::new("first")));
        sink.record(&ErrorRecord::attempt(2, &TaskError::new("second").with_trace("t")));
        sink.record(&ErrorRecord::reflection(&ReflectionError::failed("oops")));

        let text = fs::read_to_string(&path).expect("log written");
        let records: Vec<ErrorRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("valid json line"))
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].trace, "t");
        assert_eq!(records[2].source, RecordSource::Reflection);
        assert_eq!(records[2].attempt, None);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = TempDir::new().expect("temp dir");
        // A directory cannot be opened for append.
        let sink = FileSink::new(dir.path());
        sink.record(&ErrorRecord::attempt(1, &TaskError::new("lost")));
        assert_eq!(sink.path(), dir.path());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(FileSink::default().path(), Path::new(DEFAULT_ERROR_LOG));
    }
}
