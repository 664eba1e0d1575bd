//! Errors raised while interpreting an incoming notification.

/// The notification payload could not be turned into a record to process.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Malformed notification: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Notification contains no records")]
    NoRecords,
}
