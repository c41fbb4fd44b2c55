//! Thumbnail service - coordinates thumbnail generation, storage, and record creation
//!
//! This service handles the complete workflow for one creation notification:
//! 1. Download original image from the object store
//! 2. Generate thumbnail
//! 3. Upload thumbnail next to the original
//! 4. Persist a metadata record

use super::keys::{derive_thumbnail_key, is_thumbnail_key};
use super::processor::{ThumbnailProcessor, THUMBNAIL_CONTENT_TYPE};
use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::{is_creation, to_notification, CreationNotification, ThumbnailRecord};
use crate::storage::{ObjectStore, Visibility};
use aws_lambda_events::event::s3::S3Event;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Thumbnail service for generating thumbnails on object creation
pub struct ThumbnailService {
    object_store: Arc<dyn ObjectStore>,
    record_store: Arc<dyn RecordStore>,
    processor: Arc<ThumbnailProcessor>,
}

impl ThumbnailService {
    /// Create a new thumbnail service
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        record_store: Arc<dyn RecordStore>,
        processor: ThumbnailProcessor,
    ) -> Self {
        info!(size = processor.size(), "Thumbnail service initialized");

        Self {
            object_store,
            record_store,
            processor: Arc::new(processor),
        }
    }

    /// Process one creation notification
    ///
    /// Returns the uploaded thumbnail's URL, or `None` when the object is
    /// itself a generated thumbnail. Every failure aborts the invocation;
    /// a failed upload leaves no record behind. Redelivery of the same
    /// notification writes a second record for the same URL.
    pub async fn handle_creation(
        &self,
        notification: &CreationNotification,
    ) -> Result<Option<String>> {
        let CreationNotification { bucket, key, size } = notification;

        if is_thumbnail_key(key) {
            debug!(bucket = %bucket, key = %key, "Skipping generated thumbnail");
            return Ok(None);
        }

        info!(bucket = %bucket, key = %key, size, "Generating thumbnail");

        // a vanished original is an object store failure here, not a lookup miss
        let original_data = self
            .object_store
            .get(bucket, key)
            .await
            .map_err(|e| match e {
                AppError::NotFound(msg) => AppError::Storage(msg),
                e => e,
            })?;

        let thumbnail = self.processor.clone().generate_async(original_data).await?;

        let thumb_key = derive_thumbnail_key(key);
        let url = self
            .object_store
            .put(
                bucket,
                &thumb_key,
                thumbnail.data.clone(),
                THUMBNAIL_CONTENT_TYPE,
                Visibility::PublicRead,
            )
            .await?;

        let record = ThumbnailRecord::new(url.clone(), *size);
        self.record_store.put(&record).await?;

        info!(
            id = %record.id,
            thumb_key = %thumb_key,
            url = %url,
            thumb_size = thumbnail.data.len(),
            approx_reduced_size = %record.approx_reduced_size,
            "Thumbnail created successfully"
        );

        Ok(Some(url))
    }

    /// Process every creation record of an S3 event in order
    ///
    /// Non-creation records and generated thumbnails are skipped. The first
    /// failure aborts the remaining records.
    pub async fn handle_event(&self, event: &S3Event) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(event.records.len());

        for record in &event.records {
            if !is_creation(record) {
                warn!(
                    event_name = ?record.event_name,
                    key = ?record.s3.object.key,
                    "Ignoring non-creation event"
                );
                continue;
            }

            let notification = to_notification(record)?;
            if let Some(url) = self.handle_creation(&notification).await? {
                urls.push(url);
            }
        }

        Ok(urls)
    }
}
