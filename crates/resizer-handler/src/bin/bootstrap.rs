//! Serverless entrypoint.
//!
//! Configuration and storage are resolved once per process; each invocation
//! then runs the shared handler on the event payload.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use resizer_core::{init_telemetry, LogFormat, ResizerConfig};
use resizer_handler::ImageResizeHandler;
use resizer_storage::create_storage;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = match ResizerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_telemetry(LogFormat::default())?;
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_telemetry(config.log_format)?;

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        output_bucket = %config.output_bucket,
        max_file_size_bytes = config.max_file_size_bytes,
        "Starting image resizer"
    );

    let storage = create_storage(&config).await?;
    let handler = Arc::new(ImageResizeHandler::new(config, storage));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move {
            tracing::debug!(request_id = %event.context.request_id, "Invocation received");
            let response = handler.handle_value(event.payload).await.map_err(|e| {
                tracing::error!(error = %e, error_code = e.error_code(), "Image processing failed");
                Error::from(e)
            })?;
            tracing::debug!(skipped = response.is_skipped(), "Invocation complete");
            Ok::<_, Error>(response)
        }
    }))
    .await
}

