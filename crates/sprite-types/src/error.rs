use thiserror::Error;

/// Errors from the shared context persistence layer.
///
/// Both variants carry the underlying cause as text so callers can log it
/// without depending on the storage crate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from delivering a reply back to the chat venue.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply delivery failed: {0}")]
    Delivery(String),

    #[error("venue closed")]
    Closed,
}
