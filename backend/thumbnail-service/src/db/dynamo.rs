/// DynamoDB record store
///
/// Records live in a single table keyed by the string attribute `id`. Every
/// field is stored as a string attribute. Timestamps are written as RFC 3339;
/// rows holding naive `YYYY-MM-DD HH:MM:SS.ffffff` timestamps are read as UTC.
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

use super::{RecordStore, DELETE_NOT_FOUND, DELETE_OK};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{RecordPage, ScanCursor, ThumbnailRecord};

type Item = HashMap<String, AttributeValue>;

const ATTR_ID: &str = "id";
const ATTR_URL: &str = "url";
const ATTR_APPROX_REDUCED_SIZE: &str = "approxReducedSize";
const ATTR_CREATED_AT: &str = "createdAt";
const ATTR_UPDATED_AT: &str = "updatedAt";

pub struct DynamoRecordStore {
    client: Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Create a store from configuration
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = config.load_sdk_config().await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &config.aws.dynamodb_endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        info!(table = %config.table.name, "DynamoDB client initialized");
        Self::new(Client::from_conf(builder.build()), config.table.name.clone())
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put(&self, record: &ThumbnailRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| {
                AppError::Persistence(format!(
                    "Failed to insert thumbnail record into DynamoDB: {}",
                    e.into_service_error()
                ))
            })?;

        debug!(id = %record.id, table = %self.table, "Thumbnail record stored");
        Ok(())
    }

    async fn scan(&self, cursor: Option<ScanCursor>) -> Result<RecordPage> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .set_exclusive_start_key(cursor.map(|c| id_key(c.0)))
            .send()
            .await
            .map_err(|e| {
                AppError::Persistence(format!(
                    "Failed to scan DynamoDB table: {}",
                    e.into_service_error()
                ))
            })?;

        let items = output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;

        let next = output
            .last_evaluated_key
            .as_ref()
            .and_then(|key| key.get(ATTR_ID))
            .and_then(|value| value.as_s().ok())
            .map(|id| ScanCursor(id.clone()));

        debug!(count = items.len(), has_more = next.is_some(), "Scanned page");
        Ok(RecordPage { items, next })
    }

    async fn get(&self, id: &str) -> Result<Option<ThumbnailRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .set_key(Some(id_key(id.to_string())))
            .send()
            .await
            .map_err(|e| {
                AppError::Persistence(format!(
                    "Failed to read thumbnail record {id}: {}",
                    e.into_service_error()
                ))
            })?;

        output.item.as_ref().map(item_to_record).transpose()
    }

    async fn delete(&self, id: &str) -> Result<u16> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table)
            .set_key(Some(id_key(id.to_string())))
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", ATTR_ID)
            .send()
            .await;

        match result {
            Ok(_) => Ok(DELETE_OK),
            Err(e) => match e.into_service_error() {
                DeleteItemError::ConditionalCheckFailedException(_) => Ok(DELETE_NOT_FOUND),
                other => Err(AppError::Persistence(format!(
                    "Failed to delete thumbnail record {id}: {other}"
                ))),
            },
        }
    }
}

fn id_key(id: String) -> Item {
    HashMap::from([(ATTR_ID.to_string(), AttributeValue::S(id))])
}

fn record_to_item(record: &ThumbnailRecord) -> Item {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(record.id.clone())),
        (ATTR_URL.to_string(), AttributeValue::S(record.url.clone())),
        (
            ATTR_APPROX_REDUCED_SIZE.to_string(),
            AttributeValue::S(record.approx_reduced_size.clone()),
        ),
        (
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(record.created_at.to_rfc3339()),
        ),
        (
            ATTR_UPDATED_AT.to_string(),
            AttributeValue::S(record.updated_at.to_rfc3339()),
        ),
    ])
}

fn item_to_record(item: &Item) -> Result<ThumbnailRecord> {
    Ok(ThumbnailRecord {
        id: string_attr(item, ATTR_ID)?,
        url: string_attr(item, ATTR_URL)?,
        approx_reduced_size: string_attr(item, ATTR_APPROX_REDUCED_SIZE)?,
        created_at: timestamp_attr(item, ATTR_CREATED_AT)?,
        updated_at: timestamp_attr(item, ATTR_UPDATED_AT)?,
    })
}

fn string_attr(item: &Item, name: &str) -> Result<String> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        _ => Err(AppError::Persistence(format!(
            "Invalid {name} value in DynamoDB response"
        ))),
    }
}

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn timestamp_attr(item: &Item, name: &str) -> Result<DateTime<Utc>> {
    let raw = string_attr(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&raw, NAIVE_TIMESTAMP_FORMAT).map(|ts| ts.and_utc())
        })
        .map_err(|e| AppError::Persistence(format!("Invalid {name} timestamp {raw:?}: {e}")))
}
