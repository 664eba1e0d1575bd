//! In-memory storage, used by tests and dry runs.

use crate::traits::{check_object_size, Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A write observed by [`InMemoryStorage`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecord {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<(String, String), StoredObject>,
    puts: Vec<PutRecord>,
    gets: usize,
    body_reads: usize,
}

/// In-memory storage implementation
///
/// Clones share the same contents, so a test can keep one handle and give
/// another to the code under test.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<Inner>>,
    read_only: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write with `PermissionDenied`.
    pub fn read_only(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            read_only: true,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock only happens inside a failing test.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed an object, keeping whatever length and content type it carries.
    pub fn insert(&self, bucket: &str, key: &str, object: StoredObject) {
        self.lock()
            .objects
            .insert((bucket.to_string(), key.to_string()), object);
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn puts(&self) -> Vec<PutRecord> {
        self.lock().puts.clone()
    }

    pub fn put_count(&self) -> usize {
        self.lock().puts.len()
    }

    pub fn get_count(&self) -> usize {
        self.lock().gets
    }

    /// Gets that returned an object body, i.e. passed the size check.
    pub fn body_read_count(&self) -> usize {
        self.lock().body_reads
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_object_limited(
        &self,
        bucket: &str,
        key: &str,
        max_bytes: u64,
    ) -> StorageResult<StoredObject> {
        let mut inner = self.lock();
        inner.gets += 1;
        let object = inner
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        check_object_size(bucket, key, object.content_length, max_bytes)?;
        inner.body_reads += 1;
        Ok(object)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::PermissionDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "store is read-only".to_string(),
            });
        }

        let mut inner = self.lock();
        inner.puts.push(PutRecord {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: data.len(),
        });
        inner.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject::new(data, Some(content_type.to_string())),
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_same_bytes() {
        let storage = InMemoryStorage::new();
        storage
            .put_object("dest", "resized/a.png", Bytes::from_static(b"abc"), "image/png")
            .await
            .unwrap();

        let object = storage.get_object("dest", "resized/a.png").await.unwrap();
        assert_eq!(object.data, Bytes::from_static(b"abc"));
        assert_eq!(object.content_length, 3);
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert_eq!(storage.put_count(), 1);
        assert_eq!(storage.get_count(), 1);
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let storage = InMemoryStorage::new();
        let result = storage.get_object("src", "missing.jpg").await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn read_only_rejects_writes_but_shares_contents() {
        let storage = InMemoryStorage::new();
        storage.insert("src", "a.jpg", StoredObject::new(vec![1, 2, 3], None));

        let read_only = storage.read_only();
        assert!(read_only.get_object("src", "a.jpg").await.is_ok());

        let result = read_only
            .put_object("dest", "resized/a.jpg", Bytes::new(), "image/jpeg")
            .await;
        assert!(matches!(result, Err(StorageError::PermissionDenied { .. })));
        assert_eq!(storage.put_count(), 0);
    }

    #[tokio::test]
    async fn oversized_object_is_not_handed_out() {
        let storage = InMemoryStorage::new();
        storage.insert(
            "src",
            "huge.png",
            StoredObject {
                data: Bytes::from_static(b"tiny"),
                content_length: 10_000_000,
                content_type: None,
            },
        );

        let result = storage.get_object_limited("src", "huge.png", 5_242_880).await;
        assert!(matches!(
            result,
            Err(StorageError::TooLarge {
                size: 10_000_000,
                ..
            })
        ));
        assert_eq!(storage.get_count(), 1);
        assert_eq!(storage.body_read_count(), 0);
    }

    #[test]
    fn insert_preserves_reported_length() {
        let storage = InMemoryStorage::new();
        let object = StoredObject {
            data: Bytes::from_static(b"tiny"),
            content_length: 10_000_000,
            content_type: Some("image/png".to_string()),
        };
        storage.insert("src", "huge.png", object);

        assert_eq!(
            storage.object("src", "huge.png").unwrap().content_length,
            10_000_000
        );
    }
}
