//! S3 client for thumbnail operations
//!
//! Downloads originals and uploads generated thumbnails with the AWS SDK.

use super::{ObjectStore, Visibility};
use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::{debug, info};

/// S3-backed object store
pub struct S3ObjectStore {
    client: Client,
    /// Base of every returned object address, without trailing slash
    endpoint_url: String,
}

impl S3ObjectStore {
    /// Create a store from an existing SDK client
    pub fn new(client: Client, endpoint_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a store from configuration
    ///
    /// A custom `S3_ENDPOINT` (MinIO, LocalStack) switches the client to
    /// path-style addressing so returned URLs stay `{endpoint}/{bucket}/{key}`.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = config.load_sdk_config().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &config.aws.s3_endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let endpoint_url = config.s3_endpoint_url();
        info!(endpoint = %endpoint_url, region = %config.aws.region, "S3 client initialized");

        Self::new(Client::from_conf(builder.build()), endpoint_url)
    }

    /// Get the public URL for an object
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint_url, bucket, key)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes> {
        debug!(bucket = %bucket, key = %key, "Downloading from S3");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                GetObjectError::NoSuchKey(_) => {
                    AppError::NotFound(format!("Object not found: {bucket}/{key}"))
                }
                other => AppError::Storage(format!("S3 download failed: {other}")),
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read S3 object body: {e}")))?
            .into_bytes();

        debug!(bucket = %bucket, key = %key, size = bytes.len(), "Downloaded from S3");
        Ok(bytes)
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
        visibility: Visibility,
    ) -> Result<String> {
        let size = data.len();
        debug!(bucket = %bucket, key = %key, size, "Uploading to S3");

        let acl = match visibility {
            Visibility::PublicRead => ObjectCannedAcl::PublicRead,
            Visibility::Private => ObjectCannedAcl::Private,
        };

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .acl(acl)
            .send()
            .await
            .map_err(|e| {
                let error_msg = e.to_string();
                if error_msg.contains("403") || error_msg.contains("Forbidden") {
                    AppError::Storage("S3 auth failed (403): Check AWS credentials".to_string())
                } else if error_msg.contains("NoSuchBucket") {
                    AppError::Storage(format!("S3 bucket not found: {bucket}"))
                } else {
                    AppError::Storage(format!("S3 upload failed: {e}"))
                }
            })?;

        info!(bucket = %bucket, key = %key, size, "Uploaded to S3");
        Ok(self.object_url(bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Region};

    fn offline_store(endpoint: &str) -> S3ObjectStore {
        let conf = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        S3ObjectStore::new(Client::from_conf(conf), endpoint)
    }

    #[test]
    fn test_object_url_path_style() {
        let store = offline_store("https://s3.us-east-1.amazonaws.com/");
        assert_eq!(
            store.object_url("b", "photos/a_thumbnail.png"),
            "https://s3.us-east-1.amazonaws.com/b/photos/a_thumbnail.png"
        );
    }
}
