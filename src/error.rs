/// Error surface of the ORM collaborator, as seen by its logger.
///
/// The adapter never produces these; it only receives them through
/// [`trace`](crate::contract::OrmLogger::trace) and routes them to a
/// formatter. `RecordNotFound` is the one well-known sentinel: a query that
/// matched no rows, which is benign and must not surface as an error-level
/// event. The distinction is made by variant identity, never by matching
/// the rendered message.
#[derive(Debug, thiserror::Error)]
pub enum OrmError {
    /// The query completed but matched no rows.
    #[error("record not found")]
    RecordNotFound,
    /// The database rejected or failed the statement.
    #[error("statement failed: {0}")]
    Statement(String),
    /// The connection to the database was lost or refused.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl OrmError {
    /// Whether this error is the benign no-rows sentinel.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, OrmError::RecordNotFound)
    }
}
