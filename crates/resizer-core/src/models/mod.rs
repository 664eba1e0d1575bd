//! Data models exchanged with the invoking platform.

pub mod notification;
pub mod response;

pub use notification::{Notification, ObjectRef, Record, S3Bucket, S3Entity, S3Object};
pub use response::HandlerResponse;
