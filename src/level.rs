use serde::Serialize;
use std::fmt;

/// Minimum-severity threshold understood by the ORM logger contract.
///
/// Ordering is by verbosity: `Silent` suppresses everything, `Info` lets
/// everything through. A threshold admits a record when it is at least as
/// verbose as the record's severity, see [`LogLevel::allows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    Info,
}

impl LogLevel {
    /// Whether a record of the given severity passes this threshold.
    pub fn allows(self, severity: Severity) -> bool {
        match severity {
            Severity::Error => self >= LogLevel::Error,
            Severity::Warn => self >= LogLevel::Warn,
            Severity::Info => self >= LogLevel::Info,
        }
    }
}

/// Severity carried by an emitted [`LogRecord`](crate::record::LogRecord).
///
/// Distinct from [`LogLevel`]: a threshold has a `Silent` setting, a record
/// does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warn => f.write_str("WARN"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}
