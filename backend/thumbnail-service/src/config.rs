/// Configuration management for thumbnail-service
///
/// Loads configuration from environment variables once at process start.
/// `REGION_NAME`, `THUMBNAIL_SIZE` and `DYNAMODB_TABLE` are required; everything
/// else has a sensible default.
use crate::error::{AppError, Result};
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_LIST_MAX_PAGES: usize = 100;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub aws: AwsConfig,
    pub thumbnail: ThumbnailSettings,
    pub table: TableConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct AwsConfig {
    pub region: String,
    /// Custom S3 endpoint (MinIO, LocalStack)
    pub s3_endpoint: Option<String>,
    pub dynamodb_endpoint: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ThumbnailSettings {
    /// Side length of the square thumbnail in pixels
    pub size: u32,
}

#[derive(Clone, Debug)]
pub struct TableConfig {
    pub name: String,
    /// Upper bound on scan pages fetched by one list request
    pub list_max_pages: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup("REGION_NAME")
            .or_else(|| lookup("AWS_REGION"))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("REGION_NAME not set".to_string()))?;

        let size = lookup("THUMBNAIL_SIZE")
            .ok_or_else(|| AppError::Config("THUMBNAIL_SIZE not set".to_string()))?;
        let size: u32 = size.trim().parse().map_err(|e| {
            AppError::Config(format!("THUMBNAIL_SIZE must be a positive integer: {e}"))
        })?;
        if size == 0 {
            return Err(AppError::Config(
                "THUMBNAIL_SIZE must be a positive integer".to_string(),
            ));
        }

        let table_name = lookup("DYNAMODB_TABLE")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("DYNAMODB_TABLE not set".to_string()))?;

        Ok(Config {
            app: AppConfig {
                host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("HTTP_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HTTP_PORT),
            },
            aws: AwsConfig {
                region,
                s3_endpoint: lookup("S3_ENDPOINT"),
                dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT"),
            },
            thumbnail: ThumbnailSettings { size },
            table: TableConfig {
                name: table_name,
                list_max_pages: lookup("LIST_MAX_PAGES")
                    .and_then(|v| v.parse().ok())
                    .filter(|v: &usize| *v > 0)
                    .unwrap_or(DEFAULT_LIST_MAX_PAGES),
            },
        })
    }

    /// Load the shared AWS SDK configuration for the configured region
    pub async fn load_sdk_config(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws.region.clone()))
            .load()
            .await
    }

    /// Base URL under which uploaded objects are addressed
    pub fn s3_endpoint_url(&self) -> String {
        match &self.aws.s3_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://s3.{}.amazonaws.com", self.aws.region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("REGION_NAME", "eu-west-1"),
            ("THUMBNAIL_SIZE", "128"),
            ("DYNAMODB_TABLE", "thumbnails"),
        ]))
        .unwrap();

        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.thumbnail.size, 128);
        assert_eq!(config.table.name, "thumbnails");
        assert_eq!(config.table.list_max_pages, DEFAULT_LIST_MAX_PAGES);
        assert_eq!(config.app.port, DEFAULT_HTTP_PORT);
        assert_eq!(
            config.s3_endpoint_url(),
            "https://s3.eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_custom_endpoint_is_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("REGION_NAME", "us-east-1"),
            ("THUMBNAIL_SIZE", "64"),
            ("DYNAMODB_TABLE", "t"),
            ("S3_ENDPOINT", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(config.s3_endpoint_url(), "http://localhost:9000");
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("REGION_NAME", "us-east-1"),
            ("THUMBNAIL_SIZE", "0"),
            ("DYNAMODB_TABLE", "t"),
        ]))
        .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_table_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("REGION_NAME", "us-east-1"),
            ("THUMBNAIL_SIZE", "64"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("DYNAMODB_TABLE"));
    }

    #[test]
    fn test_region_falls_back_to_aws_region() {
        let config = Config::from_lookup(lookup_from(&[
            ("AWS_REGION", "ap-south-1"),
            ("THUMBNAIL_SIZE", "64"),
            ("DYNAMODB_TABLE", "t"),
        ]))
        .unwrap();

        assert_eq!(config.aws.region, "ap-south-1");
    }
}
