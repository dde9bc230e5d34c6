//! Minimal wiring: adapter over the global `tracing` subscriber,
//! registered as the process-wide default ORM logger.

use std::time::Instant;
use tracing_orm_logger::{init, LogLevel, LoggerAdapter, OrmLogger, QueryContext};

fn main() {
    let adapter = LoggerAdapter::with_tracing().set_level(LogLevel::Info);
    init::init_tracing_with(adapter.clone());

    let ctx = QueryContext::new().with_value("request_id", "req-42");

    // What the ORM does after each completed statement.
    let begin = Instant::now();
    adapter.trace(
        &ctx,
        begin,
        Box::new(|| ("select * from users where id = 42".to_string(), Some(1))),
        None,
    );

    adapter.info(&ctx, format_args!("schema migrations up to date"));
}
