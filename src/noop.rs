use crate::logger::StructuredLogger;
use crate::record::LogRecord;

/// A logger that simply drops all records.
///
/// Useful for measuring the overhead of the adapter itself, and for tests
/// that only care that nothing panics.
#[derive(Clone, Copy, Default)]
pub struct NoopLogger;

impl StructuredLogger for NoopLogger {
    fn log(&self, _record: LogRecord) {}
}
