//! Storage notification handler.

use std::sync::Arc;
use std::time::Instant;

use resizer_core::constants::DEFAULT_CONTENT_TYPE;
use resizer_core::{HandlerResponse, Notification, ResizerConfig};
use resizer_processing::{render_variants, MediaValidator, ValidationError, Variant};
use resizer_storage::{Storage, StorageError};

use crate::error::HandlerError;

/// Resizes newly stored images into the destination bucket.
///
/// Built once per process and reused for every event; it holds no per-event
/// state.
pub struct ImageResizeHandler {
    config: ResizerConfig,
    storage: Arc<dyn Storage>,
    validator: MediaValidator,
}

impl ImageResizeHandler {
    pub fn new(config: ResizerConfig, storage: Arc<dyn Storage>) -> Self {
        let validator = MediaValidator::with_max_file_size(config.max_file_size_bytes);
        Self {
            config,
            storage,
            validator,
        }
    }

    /// Handle a raw notification payload as delivered by the platform.
    pub async fn handle_value(
        &self,
        payload: serde_json::Value,
    ) -> Result<HandlerResponse, HandlerError> {
        tracing::debug!(event = %payload, "Raw event");
        let notification = Notification::from_value(payload)?;
        self.handle(&notification).await
    }

    /// Process the first record of `notification`.
    ///
    /// Returns a skipped response for keys outside the extension allow-list.
    /// Any other outcome is either a processed response after both uploads or
    /// the first error encountered. A failure on the second upload leaves the
    /// first one in place.
    #[tracing::instrument(skip_all, fields(backend = self.storage.backend_name()))]
    pub async fn handle(
        &self,
        notification: &Notification,
    ) -> Result<HandlerResponse, HandlerError> {
        let start = Instant::now();

        let record = notification.first_record()?;
        let object = record.object_ref();

        tracing::info!(
            bucket = %object.bucket,
            raw_key = %record.s3.object.key,
            key = %object.key,
            "Decoded object key"
        );

        if !self.validator.is_eligible(&object.key) {
            tracing::info!(key = %object.key, "Skipping unsupported file type");
            return Ok(HandlerResponse::skipped());
        }

        let max_bytes = self.validator.max_file_size();
        let source = match self
            .storage
            .get_object_limited(&object.bucket, &object.key, max_bytes)
            .await
        {
            Ok(source) => source,
            Err(StorageError::TooLarge { size, max, .. }) => {
                let e = ValidationError::FileTooLarge { size, max };
                tracing::warn!(key = %object.key, size_bytes = size, error = %e, "Rejecting object");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        // Backends report the stored size; the body length is checked as well.
        let original_size = source.content_length.max(source.data.len() as u64);
        if let Err(e) = self.validator.validate_file_size(original_size) {
            tracing::warn!(key = %object.key, size_bytes = original_size, error = %e, "Rejecting object");
            return Err(e.into());
        }

        let content_type = source
            .content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        // Decode/resize/encode is CPU-bound; keep it off the async workers.
        let data = source.data.clone();
        let rendered =
            tokio::task::spawn_blocking(move || render_variants(&data, &Variant::ALL)).await??;

        tracing::debug!(
            key = %object.key,
            width = rendered.source_width,
            height = rendered.source_height,
            format = ?rendered.format,
            "Rendered variants"
        );

        for output in rendered.variants {
            let output_key = output.variant.output_key(&object.key);

            tracing::info!(
                variant = output.variant.name,
                bucket = %self.config.output_bucket,
                key = %output_key,
                width = output.width,
                height = output.height,
                "Uploading {} image",
                output.variant.name
            );

            self.storage
                .put_object(
                    &self.config.output_bucket,
                    &output_key,
                    output.data,
                    &content_type,
                )
                .await?;
        }

        let processing_time_seconds = (start.elapsed().as_secs_f64() * 100.0).round() / 100.0;

        tracing::info!(
            file = %object.key,
            original_size,
            processing_time_seconds,
            "Image processed"
        );

        Ok(HandlerResponse::processed())
    }
}
