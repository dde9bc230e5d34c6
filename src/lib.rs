pub mod level;
pub mod record;
pub mod logger;
pub mod context;
pub mod error;
pub mod format;
pub mod contract;
pub mod adapter;

pub mod tracing_logger;
pub mod capture;
pub mod noop;

pub mod init;

pub use adapter::LoggerAdapter;
pub use context::{ContextFields, QueryContext};
pub use contract::{default_logger, set_default_logger, OrmLogger, SqlSource};
pub use error::OrmError;
pub use format::TraceFormatter;
pub use level::{LogLevel, Severity};
pub use logger::StructuredLogger;
pub use record::{Fields, LogRecord};
pub use tracing_logger::TracingLogger;
