use resizer_core::EventError;
use resizer_processing::{ProcessingError, ValidationError};
use resizer_storage::StorageError;

/// Every failure the handler reports to the invoking platform.
///
/// Nothing is retried here; retries and dead-lettering belong to the caller.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("Image processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl HandlerError {
    /// Machine-readable error code, used as a log field.
    pub fn error_code(&self) -> &'static str {
        match self {
            HandlerError::Event(EventError::Malformed(_)) => "MALFORMED_EVENT",
            HandlerError::Event(EventError::NoRecords) => "NO_RECORDS",
            HandlerError::Validation(ValidationError::FileTooLarge { .. }) => "FILE_TOO_LARGE",
            HandlerError::Storage(StorageError::TooLarge { .. }) => "FILE_TOO_LARGE",
            HandlerError::Storage(StorageError::NotFound { .. }) => "OBJECT_NOT_FOUND",
            HandlerError::Storage(StorageError::PermissionDenied { .. }) => "PERMISSION_DENIED",
            HandlerError::Storage(_) => "STORAGE_ERROR",
            HandlerError::Processing(ProcessingError::Encode { .. }) => "ENCODE_FAILED",
            HandlerError::Processing(ProcessingError::DimensionsTooLarge { .. }) => {
                "DIMENSIONS_TOO_LARGE"
            }
            HandlerError::Processing(_) => "DECODE_FAILED",
            HandlerError::Task(_) => "INTERNAL_ERROR",
        }
    }
}
