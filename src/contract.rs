use crate::context::QueryContext;
use crate::error::OrmError;
use crate::level::LogLevel;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Instant;

/// Deferred retrieval of the executed statement: returns the SQL text and
/// the affected-row count, `None` when the count is unknown.
///
/// The contract hands this over as a thunk so that building the SQL string
/// can be skipped entirely when the threshold suppresses output. Callees
/// invoke it at most once.
pub type SqlSource<'a> = Box<dyn FnOnce() -> (String, Option<i64>) + 'a>;

/// The logger contract an ORM framework requires of its pluggable backend.
///
/// All methods are fire-and-forget: implementations must never fail the
/// surrounding database operation, so nothing here returns a `Result`.
///
/// The `#[track_caller]` annotations make the frame that invoked the
/// contract available to implementations via `std::panic::Location`,
/// without walking the stack.
pub trait OrmLogger: Send + Sync {
    /// Return a logger whose minimum threshold is `level`.
    ///
    /// Pure configuration: the receiver is untouched and the returned
    /// instance must be installed by the caller. This is the documented
    /// mechanism for changing verbosity at runtime without racing other
    /// threads.
    fn set_level(&self, level: LogLevel) -> Arc<dyn OrmLogger>;

    /// Log a message at informational severity, if the threshold permits.
    #[track_caller]
    fn info(&self, ctx: &QueryContext, message: fmt::Arguments<'_>);

    /// Log a message at warning severity, if the threshold permits.
    #[track_caller]
    fn warn(&self, ctx: &QueryContext, message: fmt::Arguments<'_>);

    /// Log a message at error severity, if the threshold permits.
    #[track_caller]
    fn error(&self, ctx: &QueryContext, message: fmt::Arguments<'_>);

    /// Record one completed SQL execution.
    ///
    /// **Parameters**
    /// - `ctx`: per-call context, a source of extra fields only.
    /// - `begin`: when the ORM started executing the statement.
    /// - `sql`: deferred statement retrieval, see [`SqlSource`].
    /// - `err`: the execution outcome; `OrmError::RecordNotFound` is
    ///   benign and must not be reported at error strength.
    #[track_caller]
    fn trace(&self, ctx: &QueryContext, begin: Instant, sql: SqlSource<'_>, err: Option<&OrmError>);
}

static DEFAULT_LOGGER: OnceLock<RwLock<Option<Arc<dyn OrmLogger>>>> = OnceLock::new();

fn registry() -> &'static RwLock<Option<Arc<dyn OrmLogger>>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(None))
}

/// Install `logger` as the process-wide default the framework falls back to
/// when a session has no logger of its own. Last writer wins.
pub fn set_default_logger(logger: Arc<dyn OrmLogger>) {
    *registry().write().expect("default logger registry poisoned") = Some(logger);
}

/// The currently installed process-wide default, if any.
pub fn default_logger() -> Option<Arc<dyn OrmLogger>> {
    registry().read().expect("default logger registry poisoned").clone()
}
