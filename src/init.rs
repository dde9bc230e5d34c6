use crate::adapter::LoggerAdapter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Install a plain `fmt` subscriber as the global `tracing` default.
///
/// The adapter itself never touches global subscriber state; this is a
/// convenience for binaries that have no tracing setup of their own and
/// just want [`TracingLogger`](crate::tracing_logger::TracingLogger)
/// output on the console.
///
/// Panics if a global default subscriber is already installed.
pub fn init_tracing() {
    let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
}

/// [`init_tracing`] plus registration of `adapter` as the process-wide
/// default ORM logger. The recommended one-call wiring for typical
/// services.
pub fn init_tracing_with(adapter: LoggerAdapter) {
    init_tracing();
    adapter.set_as_default();
}
