//! Thumbnail Service
//!
//! Generates square PNG thumbnails for images created in an S3 bucket and
//! keeps a DynamoDB table of thumbnail records, exposed over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
