//! Configuration module
//!
//! Settings are resolved once at process start and handed to the handler and
//! storage factory explicitly. Only the destination bucket is required; every
//! other setting has a default suitable for the serverless deployment.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::{DEFAULT_REGION, MAX_FILE_SIZE_BYTES, OUTPUT_BUCKET_ENV};
use crate::storage_types::StorageBackend;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Resizer configuration
#[derive(Clone, Debug)]
pub struct ResizerConfig {
    pub output_bucket: String,
    pub storage_backend: StorageBackend,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack, etc.)
    pub local_storage_path: Option<String>,
    pub max_file_size_bytes: u64,
    pub log_format: LogFormat,
    pub environment: String,
}

impl ResizerConfig {
    /// Configuration with defaults for everything but the destination bucket.
    pub fn new(output_bucket: impl Into<String>) -> Self {
        Self {
            output_bucket: output_bucket.into(),
            storage_backend: StorageBackend::S3,
            s3_region: DEFAULT_REGION.to_string(),
            s3_endpoint: None,
            local_storage_path: None,
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            log_format: LogFormat::default(),
            environment: "development".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let output_bucket = get(OUTPUT_BUCKET_ENV)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("{} must be set", OUTPUT_BUCKET_ENV))?;

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(v) => v.parse()?,
            None => StorageBackend::S3,
        };

        let max_file_size_bytes = match get("MAX_FILE_SIZE_BYTES") {
            Some(v) => v.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be a positive integer, got {}", v)
            })?,
            None => MAX_FILE_SIZE_BYTES,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        let config = ResizerConfig {
            output_bucket,
            storage_backend,
            s3_region: get("S3_REGION")
                .or_else(|| get("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: get("S3_ENDPOINT"),
            local_storage_path: get("LOCAL_STORAGE_PATH"),
            max_file_size_bytes,
            log_format,
            environment: get("ENVIRONMENT")
                .or_else(|| get("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.output_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("{} must not be empty", OUTPUT_BUCKET_ENV));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be greater than zero"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
