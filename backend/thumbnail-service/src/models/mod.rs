/// Data models for thumbnail-service
///
/// This module defines structures for:
/// - ThumbnailRecord: metadata persisted for every generated thumbnail
/// - S3 creation notifications delivered to the generator
/// - HTTP response payloads for the record endpoints
use aws_lambda_events::event::s3::S3EventRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Empirical ratio between a thumbnail's size and its original's
const REDUCED_SIZE_RATIO: f64 = 0.53;

// ========================================
// Thumbnail Records
// ========================================

/// Metadata record for one generated thumbnail
///
/// `created_at` and `updated_at` are always written with the same value:
/// records are never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRecord {
    pub id: String,
    pub url: String,
    pub approx_reduced_size: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ThumbnailRecord {
    /// Build a fresh record for an uploaded thumbnail
    pub fn new(url: impl Into<String>, original_size: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            approx_reduced_size: approx_reduced_size(original_size),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Approximate thumbnail size in kilobytes, e.g. `100000` -> `"53.0 KB"`
pub fn approx_reduced_size(original_size: u64) -> String {
    let kb = (original_size as f64 * REDUCED_SIZE_RATIO) / 1000.0;
    // Debug keeps a trailing ".0" on integral values
    format!("{:?} KB", kb)
}

/// Continuation point of a table scan: the id of the last record returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanCursor(pub String);

impl ScanCursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a table scan
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub items: Vec<ThumbnailRecord>,
    pub next: Option<ScanCursor>,
}

/// Accumulated result of a bounded listing
#[derive(Debug, Clone, Default)]
pub struct RecordListing {
    pub items: Vec<ThumbnailRecord>,
    /// Set when the page bound stopped the listing before the table ended
    pub next: Option<ScanCursor>,
}

// ========================================
// HTTP Payloads
// ========================================

/// Query parameters accepted by the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub cursor: Option<String>,
}

/// Confirmation returned after a successful delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
    pub item_deleted_id: String,
}

// ========================================
// Creation Notifications
// ========================================

/// Whether an S3 event record reports a newly created object
///
/// Records without an event name are treated as creations.
pub fn is_creation(record: &S3EventRecord) -> bool {
    record
        .event_name
        .as_deref()
        .map_or(true, |name| name.starts_with("ObjectCreated"))
}

/// Convert an S3 event record to a notification, URL-decoding the object key
pub fn to_notification(record: &S3EventRecord) -> Result<CreationNotification> {
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("S3 record has no bucket name".to_string()))?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::BadRequest("S3 record has no object key".to_string()))?;

    Ok(CreationNotification {
        bucket,
        key: decode_object_key(raw_key)?,
        size: record
            .s3
            .object
            .size
            .and_then(|size| u64::try_from(size).ok())
            .unwrap_or(0),
    })
}

/// Keys in S3 notifications are form-encoded: `+` for space, `%XX` otherwise
fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| AppError::BadRequest(format!("Invalid object key {raw:?}: {e}")))
}

/// A newly stored object that should get a thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationNotification {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}
