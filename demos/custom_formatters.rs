//! Overriding the trace formatters and deriving record fields from the
//! call context.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_orm_logger::record::Fields;
use tracing_orm_logger::{init, LogLevel, LoggerAdapter, OrmError, OrmLogger, QueryContext};

fn main() {
    let mut adapter = LoggerAdapter::with_tracing().set_level(LogLevel::Info);
    adapter.slow_threshold = Duration::from_millis(250);

    adapter.trace_slow_query_msg = Arc::new(|sql, rows, elapsed, _caller, _err| {
        format!(
            "slow query ({}s): {} -> {} rows",
            elapsed.as_secs(),
            sql,
            rows.unwrap_or(-1)
        )
    });
    adapter.trace_error_msg = Arc::new(|sql, _rows, _elapsed, _caller, err| {
        format!("query failed: {} ({:?})", sql, err.map(|e| e.to_string()))
    });

    adapter.context_fields = Some(Arc::new(|ctx: &QueryContext| {
        let mut fields = Fields::new();
        if let Some(tenant) = ctx.value("tenant") {
            fields.insert("tenant".to_string(), tenant.clone());
        }
        fields
    }));

    init::init_tracing_with(adapter.clone());

    let ctx = QueryContext::new().with_value("tenant", "acme");

    adapter.trace(
        &ctx,
        Instant::now() - Duration::from_secs(2),
        Box::new(|| ("select count(*) from events".to_string(), Some(120_000))),
        None,
    );

    let err = OrmError::Statement("deadlock detected".to_string());
    adapter.trace(
        &ctx,
        Instant::now(),
        Box::new(|| ("update accounts set balance = balance - 10".to_string(), None)),
        Some(&err),
    );
}
