//! Resizer Storage Library
//!
//! This crate provides the blob store abstraction used by the resizer and its
//! implementations for S3, the local filesystem and an in-memory store.
//!
//! Objects are addressed by bucket and decoded key. The local backend maps a
//! bucket to a directory under its root, so `<root>/<bucket>/<key>`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::{InMemoryStorage, PutRecord};
pub use resizer_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{check_object_size, Storage, StorageError, StorageResult, StoredObject};
