use crate::logger::StructuredLogger;
use crate::record::LogRecord;
use std::sync::{Arc, Mutex};

/// [`StructuredLogger`] that buffers every record in memory.
///
/// Cloning is cheap and all clones share one buffer, so a test can hand a
/// clone to the adapter and inspect emissions through the original.
#[derive(Clone, Default)]
pub struct CaptureLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        CaptureLogger::default()
    }

    /// Number of records captured so far.
    pub fn len(&self) -> usize {
        self.records.lock().expect("capture buffer poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all captured records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("capture buffer poisoned").clone()
    }

    /// Drain and return all captured records, oldest first.
    pub fn take_all(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().expect("capture buffer poisoned"))
    }
}

impl StructuredLogger for CaptureLogger {
    fn log(&self, record: LogRecord) {
        self.records
            .lock()
            .expect("capture buffer poisoned")
            .push(record);
    }
}
