//! Thumbnail Generator - Lambda entry point for S3 creation events
//!
//! Each invocation receives an S3 event notification, generates a thumbnail
//! for every newly created image and responds with the uploaded URLs.
//!
//! Environment variables:
//! - REGION_NAME: AWS region of the bucket and table
//! - THUMBNAIL_SIZE: Side length of generated thumbnails in pixels
//! - DYNAMODB_TABLE: Table receiving thumbnail records
//! - S3_ENDPOINT / DYNAMODB_ENDPOINT: Optional endpoint overrides

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use thumbnail_service::db::DynamoRecordStore;
use thumbnail_service::services::thumbnail::{ThumbnailConfig, ThumbnailProcessor};
use thumbnail_service::services::ThumbnailService;
use thumbnail_service::storage::S3ObjectStore;
use thumbnail_service::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env()?;
    info!(
        region = %config.aws.region,
        table = %config.table.name,
        size = config.thumbnail.size,
        "Configuration loaded"
    );

    let object_store = Arc::new(S3ObjectStore::from_config(&config).await);
    let record_store = Arc::new(DynamoRecordStore::from_config(&config).await);
    let processor = ThumbnailProcessor::new(ThumbnailConfig {
        size: config.thumbnail.size,
    });
    let service = Arc::new(ThumbnailService::new(object_store, record_store, processor));

    run(service_fn(move |event: LambdaEvent<S3Event>| {
        let service = service.clone();
        async move {
            let request_id = event.context.request_id.clone();
            match service.handle_event(&event.payload).await {
                Ok(urls) => {
                    info!(request_id = %request_id, generated = urls.len(), "Event processed");
                    Ok::<_, Error>(urls)
                }
                Err(e) => {
                    error!(request_id = %request_id, error = %e, "Event processing failed");
                    Err(e.into())
                }
            }
        }
    }))
    .await
}
