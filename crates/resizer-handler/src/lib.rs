//! Resizer Handler
//!
//! Handles one storage notification: validate the object, fetch it, write a
//! resized and a thumbnail variant to the destination bucket. Storage is
//! injected, so the same handler runs against S3, the local filesystem or an
//! in-memory store.

pub mod error;
pub mod handler;

pub use error::HandlerError;
pub use handler::ImageResizeHandler;
