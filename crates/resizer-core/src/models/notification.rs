//! Storage notification payload.
//!
//! Only the fields the handler reads are modelled; everything else in the
//! platform payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::keys::decode_object_key;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Object {
    /// Form-encoded key exactly as delivered.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A source object location with its key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl Notification {
    pub fn from_value(value: serde_json::Value) -> Result<Self, EventError> {
        serde_json::from_value(value).map_err(EventError::Malformed)
    }

    /// Single-record notification for a raw (still encoded) key.
    pub fn for_object(bucket: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Notification {
            records: vec![Record {
                event_name: Some("ObjectCreated:Put".to_string()),
                s3: S3Entity {
                    bucket: S3Bucket { name: bucket.into() },
                    object: S3Object {
                        key: raw_key.into(),
                        size: None,
                    },
                },
            }],
        }
    }

    /// The record to process. Any further records are not handled.
    pub fn first_record(&self) -> Result<&Record, EventError> {
        let record = self.records.first().ok_or(EventError::NoRecords)?;
        if self.records.len() > 1 {
            tracing::warn!(
                ignored_records = self.records.len() - 1,
                "Notification carries multiple records; only the first is processed"
            );
        }
        Ok(record)
    }
}

impl Record {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            bucket: self.s3.bucket.name.clone(),
            key: decode_object_key(&self.s3.object.key),
        }
    }
}
