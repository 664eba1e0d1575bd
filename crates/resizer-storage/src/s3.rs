use crate::traits::{check_object_size, Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// S3 storage implementation
///
/// Reads come from whichever bucket the notification names while writes go to
/// the configured destination, so one `AmazonS3` store is built per bucket on
/// first use and reused afterwards.
#[derive(Clone)]
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: Arc<Mutex<HashMap<String, AmazonS3>>>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "http://localhost:4566" for LocalStack)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Storage {
            region,
            endpoint_url,
            stores: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| StorageError::ConfigError("S3 store cache poisoned".to_string()))?;

        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        // Credentials come from the environment (execution role, profile, etc.).
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http)
                .with_virtual_hosted_style_request(false);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }

    /// Object location for a decoded key.
    ///
    /// `Path::parse` keeps the key's characters as they are; the client does
    /// the URL encoding on the wire.
    fn location(key: &str) -> StorageResult<Path> {
        Path::parse(key)
            .map_err(|e| StorageError::InvalidKey(format!("Invalid object key {}: {}", key, e)))
    }

    fn map_read_error(error: ObjectStoreError, bucket: &str, key: &str) -> StorageError {
        match error {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
                StorageError::PermissionDenied {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: error.to_string(),
                }
            }
            other => StorageError::DownloadFailed(other.to_string()),
        }
    }

    fn map_write_error(error: ObjectStoreError, bucket: &str, key: &str) -> StorageError {
        match error {
            ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
                StorageError::PermissionDenied {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: error.to_string(),
                }
            }
            other => StorageError::UploadFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn get_object_limited(
        &self,
        bucket: &str,
        key: &str,
        max_bytes: u64,
    ) -> StorageResult<StoredObject> {
        let store = self.store_for(bucket)?;
        let start = std::time::Instant::now();
        let location = Self::location(key)?;

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 download failed"
            );
            Self::map_read_error(e, bucket, key)
        })?;

        let content_length = result.meta.size as u64;
        // Dropping `result` here abandons the body stream unread.
        check_object_size(bucket, key, content_length, max_bytes)?;

        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.to_string());

        let data = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = content_length,
            content_type = ?content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(StoredObject {
            data,
            content_length,
            content_type,
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        let store = self.store_for(bucket)?;
        let size = data.len() as u64;
        let location = Self::location(key)?;
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            Self::map_write_error(e, bucket, key)
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_are_built_once_per_bucket() {
        let storage = S3Storage::new(
            "us-east-1".to_string(),
            Some("http://localhost:9000".to_string()),
        );

        storage.store_for("src").unwrap();
        storage.store_for("src").unwrap();
        storage.store_for("dest-bucket").unwrap();

        assert_eq!(storage.stores.lock().unwrap().len(), 2);
    }

    #[test]
    fn keys_are_used_verbatim() {
        for key in [
            "photos/café.jpg",
            "photos/photo~1.jpg",
            "a~b [1].jpg",
            "100%.jpg",
            "folder/a b+c.png",
        ] {
            let location = S3Storage::location(key).unwrap();
            assert_eq!(location.as_ref(), key);
        }
    }

    #[test]
    fn unusable_keys_are_invalid() {
        for key in ["a//b.jpg", "photos/../cat.jpg"] {
            assert!(
                matches!(S3Storage::location(key), Err(StorageError::InvalidKey(_))),
                "key {key}"
            );
        }
    }

    #[test]
    fn not_found_maps_to_distinct_error() {
        let error = ObjectStoreError::NotFound {
            path: "photos/cat.jpg".to_string(),
            source: "missing".into(),
        };
        let mapped = S3Storage::map_read_error(error, "src", "photos/cat.jpg");
        assert!(matches!(mapped, StorageError::NotFound { .. }));
    }

    #[test]
    fn permission_errors_map_to_permission_denied() {
        let error = ObjectStoreError::PermissionDenied {
            path: "resized/cat.jpg".to_string(),
            source: "denied".into(),
        };
        let mapped = S3Storage::map_write_error(error, "dest", "resized/cat.jpg");
        assert!(matches!(mapped, StorageError::PermissionDenied { .. }));

        let error = ObjectStoreError::Generic {
            store: "S3",
            source: "connection reset".into(),
        };
        let mapped = S3Storage::map_write_error(error, "dest", "resized/cat.jpg");
        assert!(matches!(mapped, StorageError::UploadFailed(_)));
    }
}
