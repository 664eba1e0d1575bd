//! Resizer Core Library
//!
//! This crate provides the configuration, event and response models, constants
//! and telemetry setup shared by every resizer component.

pub mod config;
pub mod constants;
pub mod error;
pub mod keys;
pub mod models;
pub mod storage_types;
pub mod telemetry;

// Re-export commonly used types
pub use config::{LogFormat, ResizerConfig};
pub use error::EventError;
pub use models::{HandlerResponse, Notification, ObjectRef, Record};
pub use storage_types::StorageBackend;
pub use telemetry::init_telemetry;
