use crate::level::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Map of structured fields attached to a record.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// One emitted log record: a leveled message plus typed key/value fields.
///
/// Built by [`LoggerAdapter`](crate::adapter::LoggerAdapter) and handed to a
/// [`StructuredLogger`](crate::logger::StructuredLogger) implementation.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub fields: Fields,
    /// Caller location of the originating ORM call, `file:line`.
    pub caller: Option<String>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        LogRecord {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
            fields: Fields::new(),
            caller: None,
        }
    }
}
