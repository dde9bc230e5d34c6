use crate::level::Severity;
use crate::logger::StructuredLogger;
use crate::record::LogRecord;

/// Target under which all forwarded records are emitted.
pub const TRACING_TARGET: &str = "orm::query";

/// [`StructuredLogger`] that forwards records to the global `tracing`
/// subscriber.
///
/// `tracing` requires field names to be known at compile time, so the
/// record's dynamic key/value fields travel as a single JSON-encoded
/// `fields` value; `caller` carries the originating `file:line` when the
/// adapter captured one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StructuredLogger for TracingLogger {
    fn log(&self, record: LogRecord) {
        let fields = serde_json::to_string(&record.fields).unwrap_or_else(|_| "{}".to_string());
        let caller = record.caller.as_deref().unwrap_or("");
        match record.severity {
            Severity::Info => tracing::info!(
                target: TRACING_TARGET,
                fields = %fields,
                caller = %caller,
                "{}",
                record.message
            ),
            Severity::Warn => tracing::warn!(
                target: TRACING_TARGET,
                fields = %fields,
                caller = %caller,
                "{}",
                record.message
            ),
            Severity::Error => tracing::error!(
                target: TRACING_TARGET,
                fields = %fields,
                caller = %caller,
                "{}",
                record.message
            ),
        }
    }
}
