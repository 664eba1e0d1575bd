pub mod fixtures;

use std::sync::Arc;

use resizer_core::ResizerConfig;
use resizer_handler::ImageResizeHandler;
use resizer_storage::InMemoryStorage;

pub const SOURCE_BUCKET: &str = "src";
pub const DEST_BUCKET: &str = "dest-bucket";

/// Handler wired to an in-memory store, plus a handle to inspect that store.
pub struct TestApp {
    pub handler: ImageResizeHandler,
    pub storage: InMemoryStorage,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(ResizerConfig::new(DEST_BUCKET))
    }

    pub fn with_config(config: ResizerConfig) -> Self {
        let storage = InMemoryStorage::new();
        let handler = ImageResizeHandler::new(config, Arc::new(storage.clone()));
        Self { handler, storage }
    }

    /// Handler whose writes all fail with a permission error.
    pub fn read_only() -> Self {
        let storage = InMemoryStorage::new();
        let handler = ImageResizeHandler::new(
            ResizerConfig::new(DEST_BUCKET),
            Arc::new(storage.read_only()),
        );
        Self { handler, storage }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
