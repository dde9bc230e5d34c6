use crate::record::Fields;
use std::sync::Arc;

/// Per-call context handed through the ORM logger contract.
///
/// Stands in for a request context: a bag of values the application
/// attached upstream (request id, tenant, user, ...). The adapter consults
/// it only through the configured extraction callback, never as a
/// cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    values: Fields,
}

impl QueryContext {
    pub fn new() -> Self {
        QueryContext::default()
    }

    /// Attach a value under `key`, replacing any previous one.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a value by key.
    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }
}

/// Callback deriving extra structured fields from a [`QueryContext`].
///
/// When configured on the adapter, every emitted record's fields include
/// exactly the pairs this callback returns for the call's context.
pub type ContextFields = Arc<dyn Fn(&QueryContext) -> Fields + Send + Sync>;
