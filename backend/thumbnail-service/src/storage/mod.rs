/// Object storage layer
///
/// The `ObjectStore` trait is the seam between the thumbnail pipeline and the
/// bucket/key blob service. `S3ObjectStore` talks to AWS S3 (or any
/// S3-compatible endpoint); `MemoryObjectStore` backs tests and local runs.
use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub mod memory;
pub mod s3;

pub use memory::{MemoryObjectStore, StoredObject};
pub use s3::S3ObjectStore;

/// Access level applied to an uploaded object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    PublicRead,
}

/// Bucket/key addressed binary object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes; `AppError::NotFound` when the key is absent
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Store an object and return its fully-qualified address
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<String>;
}
