/// Record persistence layer
///
/// This module provides:
/// - The `RecordStore` trait used by the creation and record handlers
/// - A DynamoDB implementation for production
/// - An in-memory implementation for tests and local runs
use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RecordPage, ScanCursor, ThumbnailRecord};

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoRecordStore;
pub use memory::MemoryRecordStore;

/// Status reported for a delete of an existing record
pub const DELETE_OK: u16 = 200;
/// Status reported when the record to delete does not exist
pub const DELETE_NOT_FOUND: u16 = 404;

/// Key-value table of thumbnail records, keyed by `id`
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record
    async fn put(&self, record: &ThumbnailRecord) -> Result<()>;

    /// Fetch one page, continuing after `cursor` when given
    async fn scan(&self, cursor: Option<ScanCursor>) -> Result<RecordPage>;

    /// Look up a record by id
    async fn get(&self, id: &str) -> Result<Option<ThumbnailRecord>>;

    /// Delete a record by id and report the store's status code
    async fn delete(&self, id: &str) -> Result<u16>;
}
