use crate::record::LogRecord;

/// Destination for [`LogRecord`]s produced by the adapter.
///
/// Implementations forward records to a concrete structured-logging
/// facility (`tracing`, an in-memory buffer, stdout, etc). The adapter
/// calls `log` synchronously on the thread that issued the ORM call and
/// never inspects a result.
///
/// **Requirements**
/// - Must be safe to call from many threads at once; the adapter adds no
///   locking of its own.
/// - Must not panic: the adapter is fire-and-forget and must never fail
///   the surrounding database operation.
pub trait StructuredLogger: Send + Sync {
    /// Emit a single fully-populated record.
    fn log(&self, record: LogRecord);
}
