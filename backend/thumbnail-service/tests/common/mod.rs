//! Shared fixtures for thumbnail-service integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use thumbnail_service::db::{MemoryRecordStore, RecordStore};
use thumbnail_service::error::{AppError, Result};
use thumbnail_service::models::{RecordPage, ScanCursor, ThumbnailRecord};
use thumbnail_service::services::thumbnail::{ThumbnailConfig, ThumbnailProcessor};
use thumbnail_service::services::ThumbnailService;
use thumbnail_service::storage::{MemoryObjectStore, ObjectStore, Visibility};

pub const BASE_URL: &str = "https://s3.us-east-1.amazonaws.com";
pub const THUMB_SIZE: u32 = 24;

/// A JPEG-encoded landscape test image
pub fn jpeg_image(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(90))
        .expect("encode test jpeg");
    buf
}

/// One S3 notification record as delivered by the bucket trigger
pub fn s3_record_json(event_name: &str, bucket: &str, key: &str, size: u64) -> serde_json::Value {
    serde_json::json!({
        "eventVersion": "2.1",
        "eventSource": "aws:s3",
        "awsRegion": "us-east-1",
        "eventTime": "2024-01-01T12:00:00.000Z",
        "eventName": event_name,
        "userIdentity": { "principalId": "AWS:EXAMPLE" },
        "requestParameters": { "sourceIPAddress": "127.0.0.1" },
        "responseElements": {
            "x-amz-request-id": "C3D13FE58DE4C810",
            "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
        },
        "s3": {
            "s3SchemaVersion": "1.0",
            "configurationId": "thumbnail-trigger",
            "bucket": {
                "name": bucket,
                "ownerIdentity": { "principalId": "EXAMPLE" },
                "arn": format!("arn:aws:s3:::{bucket}")
            },
            "object": {
                "key": key,
                "size": size,
                "eTag": "0123456789abcdef0123456789abcdef",
                "sequencer": "0A1B2C3D4E5F678901"
            }
        }
    })
}

pub struct Harness {
    pub objects: Arc<MemoryObjectStore>,
    pub records: Arc<MemoryRecordStore>,
    pub service: ThumbnailService,
}

pub fn harness() -> Harness {
    let objects = Arc::new(MemoryObjectStore::new(BASE_URL));
    let records = Arc::new(MemoryRecordStore::new());
    let service = ThumbnailService::new(
        objects.clone(),
        records.clone(),
        ThumbnailProcessor::new(ThumbnailConfig { size: THUMB_SIZE }),
    );
    Harness {
        objects,
        records,
        service,
    }
}

/// Object store whose uploads always fail
pub struct UploadFailingStore {
    pub inner: MemoryObjectStore,
}

#[async_trait]
impl ObjectStore for UploadFailingStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        self.inner.get(bucket, key).await
    }

    async fn put(
        &self,
        _bucket: &str,
        _key: &str,
        _data: Bytes,
        _content_type: &str,
        _visibility: Visibility,
    ) -> Result<String> {
        Err(AppError::Storage("S3 upload failed: access denied".to_string()))
    }
}

/// Record store whose every operation fails
pub struct BrokenRecordStore;

#[async_trait]
impl RecordStore for BrokenRecordStore {
    async fn put(&self, _record: &ThumbnailRecord) -> Result<()> {
        Err(AppError::Persistence("table unavailable".to_string()))
    }

    async fn scan(&self, _cursor: Option<ScanCursor>) -> Result<RecordPage> {
        Err(AppError::Persistence("table unavailable".to_string()))
    }

    async fn get(&self, _id: &str) -> Result<Option<ThumbnailRecord>> {
        Err(AppError::Persistence("table unavailable".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<u16> {
        Err(AppError::Persistence("table unavailable".to_string()))
    }
}
