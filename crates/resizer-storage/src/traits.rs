//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Permission denied for {bucket}/{key}: {message}")]
    PermissionDenied {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Object {bucket}/{key} is {size} bytes, over the {max} byte limit")]
    TooLarge {
        bucket: String,
        key: String,
        size: u64,
        max: u64,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object read back from the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    /// Size reported by the store. Normally equal to `data.len()`.
    pub content_length: u64,
    pub content_type: Option<String>,
}

impl StoredObject {
    pub fn new(data: impl Into<Bytes>, content_type: Option<String>) -> Self {
        let data = data.into();
        Self {
            content_length: data.len() as u64,
            data,
            content_type,
        }
    }
}

/// Reject an object whose reported size is over `max_bytes`.
///
/// Backends call this before reading the body.
pub fn check_object_size(bucket: &str, key: &str, size: u64, max_bytes: u64) -> StorageResult<()> {
    if size > max_bytes {
        return Err(StorageError::TooLarge {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size,
            max: max_bytes,
        });
    }
    Ok(())
}

/// Storage abstraction trait
///
/// The handler only ever reads one object and writes objects back, so the
/// surface is limited to whole-object get and put.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch an object with its reported length and declared content type.
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        self.get_object_limited(bucket, key, u64::MAX).await
    }

    /// Fetch an object unless its reported size exceeds `max_bytes`.
    ///
    /// An oversized object fails with `TooLarge` and its body is never read.
    async fn get_object_limited(
        &self,
        bucket: &str,
        key: &str,
        max_bytes: u64,
    ) -> StorageResult<StoredObject>;

    /// Write an object, replacing any existing one at the same key.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Get the storage backend name, for logging.
    fn backend_name(&self) -> &'static str;
}
