use crate::error::OrmError;
use std::sync::Arc;
use std::time::Duration;

/// Caller-overridable formatter for one trace event.
///
/// Arguments are the executed SQL text, the affected-row count (`None`
/// when unknown), the elapsed duration, the caller location (`file:line`)
/// when captured, and the execution error when present. Returns the
/// rendered log message.
pub type TraceFormatter = Arc<
    dyn Fn(&str, Option<i64>, Duration, Option<&str>, Option<&OrmError>) -> String + Send + Sync,
>;

fn rows_display(rows: Option<i64>) -> String {
    rows.map_or_else(|| "-".to_string(), |r| r.to_string())
}

fn render(
    tag: Option<&str>,
    sql: &str,
    rows: Option<i64>,
    elapsed: Duration,
    caller: Option<&str>,
    err: Option<&OrmError>,
) -> String {
    let mut msg = String::new();
    if let Some(caller) = caller {
        msg.push_str(caller);
        msg.push(' ');
    }
    if let Some(err) = err {
        msg.push_str(&err.to_string());
        msg.push(' ');
    }
    if let Some(tag) = tag {
        msg.push_str(tag);
        msg.push(' ');
    }
    msg.push_str(&format!(
        "[{:.3}ms] [rows:{}] {}",
        elapsed.as_secs_f64() * 1000.0,
        rows_display(rows),
        sql
    ));
    msg
}

/// Default formatter for ordinary traces.
pub fn default_query_msg(
    sql: &str,
    rows: Option<i64>,
    elapsed: Duration,
    caller: Option<&str>,
    err: Option<&OrmError>,
) -> String {
    render(None, sql, rows, elapsed, caller, err)
}

/// Default formatter for traces that crossed the slow-query threshold.
pub fn default_slow_msg(
    sql: &str,
    rows: Option<i64>,
    elapsed: Duration,
    caller: Option<&str>,
    err: Option<&OrmError>,
) -> String {
    render(Some("SLOW SQL"), sql, rows, elapsed, caller, err)
}

/// Default formatter for traces that ended in an error.
pub fn default_error_msg(
    sql: &str,
    rows: Option<i64>,
    elapsed: Duration,
    caller: Option<&str>,
    err: Option<&OrmError>,
) -> String {
    render(None, sql, rows, elapsed, caller, err)
}
