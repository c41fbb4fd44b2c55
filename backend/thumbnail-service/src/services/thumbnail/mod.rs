//! Thumbnail generation service
//!
//! This module provides thumbnail generation capabilities:
//! - Key derivation for generated thumbnails
//! - Image processor for cropping, resizing and encoding
//! - Service coordinating one creation notification end-to-end

pub mod keys;
pub mod processor;
pub mod service;

pub use keys::{derive_thumbnail_key, is_thumbnail_key, THUMBNAIL_SUFFIX};
pub use processor::{ThumbnailConfig, ThumbnailProcessor, ThumbnailResult};
pub use service::ThumbnailService;
