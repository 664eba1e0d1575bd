//! Resizer CLI: run the image handler locally or print sample notifications.
//!
//! `process` reads the same environment as the deployed function
//! (OUTPUT_BUCKET, STORAGE_BACKEND, LOCAL_STORAGE_PATH, ...).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use resizer_cli::encode_object_key;
use resizer_core::constants::OUTPUT_BUCKET_ENV;
use resizer_core::{init_telemetry, LogFormat, Notification, ResizerConfig};
use resizer_handler::ImageResizeHandler;
use resizer_storage::create_storage;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "resizer", about = "Image resizer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the handler once against a notification
    Process {
        #[command(flatten)]
        source: EventSource,
        /// Destination bucket, overriding OUTPUT_BUCKET
        #[arg(long)]
        output_bucket: Option<String>,
    },
    /// Print a single-record notification for an object
    SampleEvent {
        /// Source bucket name
        #[arg(long)]
        bucket: String,
        /// Object key, unencoded
        #[arg(long)]
        key: String,
    },
}

#[derive(Args)]
struct EventSource {
    /// Path to a notification JSON file
    #[arg(long, conflicts_with_all = ["bucket", "key"], required_unless_present = "bucket")]
    event: Option<PathBuf>,
    /// Build the notification from a bucket and unencoded key
    #[arg(long, requires = "key")]
    bucket: Option<String>,
    /// Object key, unencoded
    #[arg(long, requires = "bucket")]
    key: Option<String>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn load_event(source: EventSource) -> anyhow::Result<serde_json::Value> {
    if let Some(path) = source.event {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("Event file {} is not valid JSON", path.display()));
    }

    match (source.bucket, source.key) {
        (Some(bucket), Some(key)) => {
            let notification = Notification::for_object(bucket, encode_object_key(&key));
            serde_json::to_value(notification).context("Serialize notification")
        }
        _ => anyhow::bail!("Pass either --event or both --bucket and --key"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::SampleEvent { bucket, key } => {
            print_json(&Notification::for_object(bucket, encode_object_key(&key)))?;
        }
        Commands::Process {
            source,
            output_bucket,
        } => {
            init_telemetry(LogFormat::Pretty)
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

            let config = ResizerConfig::from_lookup(|name: &str| {
                if name == OUTPUT_BUCKET_ENV {
                    if let Some(bucket) = output_bucket.clone() {
                        return Some(bucket);
                    }
                }
                std::env::var(name).ok()
            })
            .context("Invalid configuration")?;

            let storage = create_storage(&config)
                .await
                .context("Failed to initialize storage")?;
            let handler = ImageResizeHandler::new(config, Arc::clone(&storage));

            let payload = load_event(source)?;
            let response = handler.handle_value(payload).await.map_err(|e| {
                tracing::error!(error = %e, error_code = e.error_code(), "Processing failed");
                anyhow::Error::new(e)
            })?;

            print_json(&response)?;
        }
    }

    Ok(())
}
