use crate::context::{ContextFields, QueryContext};
use crate::contract::{self, OrmLogger, SqlSource};
use crate::error::OrmError;
use crate::format::{self, TraceFormatter};
use crate::level::{LogLevel, Severity};
use crate::logger::StructuredLogger;
use crate::record::{Fields, LogRecord};
use crate::tracing_logger::TracingLogger;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Adapter that satisfies the [`OrmLogger`] contract by forwarding to an
/// injected [`StructuredLogger`].
///
/// Construct once at wiring time, adjust the public configuration fields,
/// then hand it to the ORM session config (and optionally call
/// [`set_as_default`](LoggerAdapter::set_as_default)). All state is either
/// immutable or replaced wholesale by [`set_level`](LoggerAdapter::set_level),
/// so a single instance can serve any number of threads without locking.
#[derive(Clone)]
pub struct LoggerAdapter {
    logger: Arc<dyn StructuredLogger>,
    level: LogLevel,
    /// Successful queries at or above this duration log at warning
    /// severity through the slow formatter. Zero disables the check.
    pub slow_threshold: Duration,
    /// Skip caller-location capture entirely.
    pub skip_caller_lookup: bool,
    /// Treat [`OrmError::RecordNotFound`] in `trace` as a benign outcome
    /// rather than an error event.
    pub ignore_record_not_found: bool,
    /// Formatter for ordinary traces.
    pub trace_query_msg: TraceFormatter,
    /// Formatter for traces that crossed `slow_threshold`.
    pub trace_slow_query_msg: TraceFormatter,
    /// Formatter for traces that ended in a non-benign error.
    pub trace_error_msg: TraceFormatter,
    /// Optional derivation of extra record fields from the call context.
    pub context_fields: Option<ContextFields>,
}

impl LoggerAdapter {
    /// New adapter over `logger` with the stock configuration: threshold
    /// `Warn`, slow threshold 100ms, default formatters, no context
    /// callback.
    pub fn new(logger: Arc<dyn StructuredLogger>) -> Self {
        LoggerAdapter {
            logger,
            level: LogLevel::Warn,
            slow_threshold: Duration::from_millis(100),
            skip_caller_lookup: false,
            ignore_record_not_found: true,
            trace_query_msg: Arc::new(format::default_query_msg),
            trace_slow_query_msg: Arc::new(format::default_slow_msg),
            trace_error_msg: Arc::new(format::default_error_msg),
            context_fields: None,
        }
    }

    /// New adapter forwarding to the global `tracing` subscriber.
    pub fn with_tracing() -> Self {
        LoggerAdapter::new(Arc::new(TracingLogger))
    }

    /// Copy of this adapter with the minimum threshold set to `level`.
    ///
    /// The receiver is untouched; callers must install the returned value.
    pub fn set_level(&self, level: LogLevel) -> Self {
        let mut next = self.clone();
        next.level = level;
        next
    }

    /// Current minimum-severity threshold.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Install a clone of this adapter as the process-wide default logger.
    ///
    /// Explicit registration, last writer wins; see
    /// [`contract::set_default_logger`].
    pub fn set_as_default(&self) {
        contract::set_default_logger(Arc::new(self.clone()));
    }

    fn fields_for(&self, ctx: &QueryContext) -> Fields {
        self.context_fields
            .as_ref()
            .map(|derive| derive(ctx))
            .unwrap_or_default()
    }

    fn emit(&self, severity: Severity, message: String, ctx: &QueryContext, caller: Option<String>) {
        let mut record = LogRecord::new(severity, message);
        record.fields = self.fields_for(ctx);
        record.caller = caller;
        self.logger.log(record);
    }

    #[track_caller]
    fn caller(&self) -> Option<String> {
        if self.skip_caller_lookup {
            return None;
        }
        let location = Location::caller();
        Some(format!("{}:{}", location.file(), location.line()))
    }

    #[track_caller]
    fn log_at(&self, severity: Severity, ctx: &QueryContext, message: fmt::Arguments<'_>) {
        if !self.level.allows(severity) {
            return;
        }
        let caller = self.caller();
        self.emit(severity, message.to_string(), ctx, caller);
    }

    #[track_caller]
    fn trace_event(
        &self,
        ctx: &QueryContext,
        begin: Instant,
        sql: SqlSource<'_>,
        err: Option<&OrmError>,
    ) {
        if self.level == LogLevel::Silent {
            return;
        }
        let elapsed = begin.elapsed();
        let caller = self.caller();

        let error_event =
            err.filter(|e| !(self.ignore_record_not_found && e.is_record_not_found()));

        if let Some(err) = error_event {
            if self.level >= LogLevel::Error {
                let (sql, rows) = sql();
                let message =
                    (self.trace_error_msg)(&sql, rows, elapsed, caller.as_deref(), Some(err));
                self.emit(Severity::Warn, message, ctx, caller);
            }
        } else if !self.slow_threshold.is_zero()
            && elapsed >= self.slow_threshold
            && self.level >= LogLevel::Warn
        {
            let (sql, rows) = sql();
            let message =
                (self.trace_slow_query_msg)(&sql, rows, elapsed, caller.as_deref(), error_event);
            self.emit(Severity::Warn, message, ctx, caller);
        } else if self.level >= LogLevel::Info {
            let (sql, rows) = sql();
            let message =
                (self.trace_query_msg)(&sql, rows, elapsed, caller.as_deref(), error_event);
            self.emit(Severity::Info, message, ctx, caller);
        }
    }
}

impl OrmLogger for LoggerAdapter {
    fn set_level(&self, level: LogLevel) -> Arc<dyn OrmLogger> {
        Arc::new(LoggerAdapter::set_level(self, level))
    }

    #[track_caller]
    fn info(&self, ctx: &QueryContext, message: fmt::Arguments<'_>) {
        self.log_at(Severity::Info, ctx, message);
    }

    #[track_caller]
    fn warn(&self, ctx: &QueryContext, message: fmt::Arguments<'_>) {
        self.log_at(Severity::Warn, ctx, message);
    }

    #[track_caller]
    fn error(&self, ctx: &QueryContext, message: fmt::Arguments<'_>) {
        self.log_at(Severity::Error, ctx, message);
    }

    #[track_caller]
    fn trace(&self, ctx: &QueryContext, begin: Instant, sql: SqlSource<'_>, err: Option<&OrmError>) {
        self.trace_event(ctx, begin, sql, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureLogger;
    use std::sync::atomic::{AtomicBool, Ordering};

    const SQL: &str = "select * from users";
    const ROWS: i64 = 35364;

    fn setup() -> (LoggerAdapter, CaptureLogger) {
        let capture = CaptureLogger::new();
        (LoggerAdapter::new(Arc::new(capture.clone())), capture)
    }

    fn sql_source() -> SqlSource<'static> {
        Box::new(|| (SQL.to_string(), Some(ROWS)))
    }

    fn begin_secs_ago(secs: u64) -> Instant {
        Instant::now() - Duration::from_secs(secs)
    }

    #[test]
    fn messages_below_threshold_are_suppressed() {
        let (adapter, capture) = setup();
        let ctx = QueryContext::new();

        adapter.set_level(LogLevel::Warn).info(&ctx, format_args!("test {}", 1));
        adapter.set_level(LogLevel::Error).warn(&ctx, format_args!("test {}", 1));
        adapter.set_level(LogLevel::Silent).error(&ctx, format_args!("test {}", 1));

        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn messages_at_or_above_threshold_emit_exactly_one_record() {
        let (adapter, capture) = setup();
        let ctx = QueryContext::new();

        let info = adapter.set_level(LogLevel::Info);
        let warn = adapter.set_level(LogLevel::Warn);
        let error = adapter.set_level(LogLevel::Error);

        info.info(&ctx, format_args!("test {}", 1));
        warn.warn(&ctx, format_args!("test {}", 1));
        error.error(&ctx, format_args!("test {}", 1));

        let records = capture.take_all();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.message, "test 1");
        }
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(records[1].severity, Severity::Warn);
        assert_eq!(records[2].severity, Severity::Error);
    }

    #[test]
    fn warn_threshold_scenario() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Warn);
        let ctx = QueryContext::new();

        adapter.info(&ctx, format_args!("x"));
        assert_eq!(capture.len(), 0);

        adapter.warn(&ctx, format_args!("x"));
        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "x");

        adapter.error(&ctx, format_args!("x"));
        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "x");

        adapter
            .set_level(LogLevel::Silent)
            .error(&ctx, format_args!("x"));
        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn fast_trace_emits_one_info_record() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Info);

        adapter.trace_event(&QueryContext::new(), Instant::now(), sql_source(), None);

        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);
        assert!(records[0].message.contains(SQL));
    }

    #[test]
    fn fast_trace_is_suppressed_below_info() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Warn);

        adapter.trace_event(&QueryContext::new(), Instant::now(), sql_source(), None);

        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn slow_trace_warns_regardless_of_info_gate() {
        let (adapter, capture) = setup();
        let mut adapter = adapter.set_level(LogLevel::Warn);
        adapter.slow_threshold = Duration::from_secs(5);

        adapter.trace_event(&QueryContext::new(), begin_secs_ago(10), sql_source(), None);

        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warn);
        let message = &records[0].message;
        assert!(message.contains("SLOW SQL"));
        assert!(message.contains(SQL));
        assert!(message.contains(&ROWS.to_string()));
        // At least second precision: ten seconds render as 10000.xxx ms.
        assert!(message.contains("1000"));
    }

    #[test]
    fn failed_trace_warns_regardless_of_elapsed() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Warn);
        let err = OrmError::Statement("boom".to_string());

        adapter.trace_event(&QueryContext::new(), Instant::now(), sql_source(), Some(&err));

        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warn);
        assert!(records[0].message.contains("statement failed: boom"));
        assert!(records[0].message.contains(SQL));
    }

    #[test]
    fn record_not_found_is_benign_by_default() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Info);
        let err = OrmError::RecordNotFound;

        adapter.trace_event(&QueryContext::new(), Instant::now(), sql_source(), Some(&err));

        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);
        assert!(!records[0].message.contains("record not found"));
    }

    #[test]
    fn record_not_found_routes_to_error_formatter_when_not_ignored() {
        let (adapter, capture) = setup();
        let mut adapter = adapter.set_level(LogLevel::Info);
        adapter.ignore_record_not_found = false;
        let err = OrmError::RecordNotFound;

        adapter.trace_event(&QueryContext::new(), Instant::now(), sql_source(), Some(&err));

        let records = capture.take_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warn);
        assert!(records[0].message.contains("record not found"));
    }

    #[test]
    fn silent_trace_never_evaluates_sql() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Silent);
        let invoked = AtomicBool::new(false);

        adapter.trace_event(
            &QueryContext::new(),
            begin_secs_ago(10),
            Box::new(|| {
                invoked.store(true, Ordering::SeqCst);
                (SQL.to_string(), Some(ROWS))
            }),
            Some(&OrmError::Statement("boom".to_string())),
        );

        assert!(!invoked.load(Ordering::SeqCst));
        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn suppressed_trace_never_evaluates_sql() {
        let (adapter, capture) = setup();
        // Warn threshold, fast query, no error: every branch is gated off.
        let adapter = adapter.set_level(LogLevel::Warn);
        let invoked = AtomicBool::new(false);

        adapter.trace_event(
            &QueryContext::new(),
            Instant::now(),
            Box::new(|| {
                invoked.store(true, Ordering::SeqCst);
                (SQL.to_string(), Some(ROWS))
            }),
            None,
        );

        assert!(!invoked.load(Ordering::SeqCst));
        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn context_callback_fields_reach_every_record() {
        let (adapter, capture) = setup();
        let mut adapter = adapter.set_level(LogLevel::Info);
        adapter.context_fields = Some(Arc::new(|ctx: &QueryContext| {
            let mut fields = Fields::new();
            for key in ["request_id", "tenant"] {
                if let Some(value) = ctx.value(key) {
                    fields.insert(key.to_string(), value.clone());
                }
            }
            fields
        }));

        let ctx = QueryContext::new()
            .with_value("request_id", "req-1")
            .with_value("tenant", "acme")
            .with_value("unrelated", true);

        adapter.error(&ctx, format_args!("test"));
        adapter.trace_event(&ctx, Instant::now(), sql_source(), None);

        let records = capture.take_all();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.fields.len(), 2);
            assert_eq!(record.fields["request_id"], serde_json::json!("req-1"));
            assert_eq!(record.fields["tenant"], serde_json::json!("acme"));
        }
    }

    #[test]
    fn custom_formatters_receive_all_trace_values() {
        let (adapter, capture) = setup();
        let mut adapter = adapter.set_level(LogLevel::Info);
        adapter.slow_threshold = Duration::from_secs(5);

        let fmt = |tag: &'static str| -> TraceFormatter {
            Arc::new(move |sql, rows, elapsed, _caller, err| {
                format!(
                    "{} {} {} {}s {}",
                    tag,
                    sql,
                    rows.unwrap_or(-1),
                    elapsed.as_secs(),
                    err.map_or_else(|| "-".to_string(), |e| e.to_string()),
                )
            })
        };
        adapter.trace_query_msg = fmt("Trace");
        adapter.trace_slow_query_msg = fmt("Slow");
        adapter.trace_error_msg = fmt("Error");

        let err = OrmError::Statement("boom".to_string());
        let cases: [(u64, Option<&OrmError>, &str); 3] = [
            (0, None, "Trace"),
            (0, Some(&err), "Error"),
            (10, None, "Slow"),
        ];
        for (age, err, tag) in cases {
            adapter.trace_event(&QueryContext::new(), begin_secs_ago(age), sql_source(), err);
            let records = capture.take_all();
            assert_eq!(records.len(), 1);
            let message = &records[0].message;
            assert!(message.starts_with(tag), "message: {message}");
            assert!(message.contains(SQL));
            assert!(message.contains(&ROWS.to_string()));
        }
    }

    #[test]
    fn set_level_leaves_the_receiver_untouched() {
        let (adapter, _capture) = setup();
        let quieter = adapter.set_level(LogLevel::Silent);
        assert_eq!(adapter.level(), LogLevel::Warn);
        assert_eq!(quieter.level(), LogLevel::Silent);
    }

    #[test]
    fn caller_location_points_at_this_file() {
        let (adapter, capture) = setup();
        let adapter = adapter.set_level(LogLevel::Info);

        adapter.info(&QueryContext::new(), format_args!("x"));

        let records = capture.take_all();
        let caller = records[0].caller.as_deref().unwrap_or_default();
        assert!(caller.contains("adapter.rs"), "caller: {caller}");
    }

    #[test]
    fn skip_caller_lookup_drops_location() {
        let (adapter, capture) = setup();
        let mut adapter = adapter.set_level(LogLevel::Info);
        adapter.skip_caller_lookup = true;

        adapter.info(&QueryContext::new(), format_args!("x"));

        assert_eq!(capture.take_all()[0].caller, None);
    }
}
