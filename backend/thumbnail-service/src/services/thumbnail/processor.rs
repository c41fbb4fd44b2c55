//! Thumbnail processor - generates square thumbnails from original images
//!
//! Center-crops the longer dimension to a square, scales it to the configured
//! side length and encodes the result as PNG.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use crate::error::{AppError, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Content type of every generated thumbnail
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/png";

/// Configuration for thumbnail generation
#[derive(Clone, Debug)]
pub struct ThumbnailConfig {
    /// Side length of the square output in pixels
    pub size: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self { size: 200 }
    }
}

/// Result of thumbnail generation
#[derive(Debug)]
pub struct ThumbnailResult {
    /// The thumbnail image data as PNG
    pub data: Bytes,
    /// Width of the thumbnail
    pub width: u32,
    /// Height of the thumbnail
    pub height: u32,
}

/// Thumbnail processor
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    pub fn size(&self) -> u32 {
        self.config.size
    }

    /// Generate a thumbnail from the given image data (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `generate_async` instead.
    pub fn generate(&self, original_data: &[u8]) -> Result<ThumbnailResult> {
        let img = image::load_from_memory(original_data)
            .map_err(|e| AppError::Decode(format!("Failed to decode image: {e}")))?;

        let (orig_w, orig_h) = img.dimensions();
        if orig_w == 0 || orig_h == 0 {
            return Err(AppError::Decode("Image has no pixels".to_string()));
        }
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            "Processing image for thumbnail"
        );

        let size = self.config.size;
        let (x, y, side) = center_square(orig_w, orig_h);
        let thumbnail = img
            .crop_imm(x, y, side, side)
            .resize_exact(size, size, FilterType::Lanczos3);

        let data = encode_png(&thumbnail)?;

        debug!(
            width = size,
            height = size,
            size = data.len(),
            "Thumbnail generated"
        );

        Ok(ThumbnailResult {
            data,
            width: size,
            height: size,
        })
    }

    /// Generate a thumbnail asynchronously using a blocking thread pool
    ///
    /// # Example
    /// ```ignore
    /// let processor = Arc::new(ThumbnailProcessor::with_defaults());
    /// let result = processor.generate_async(image_bytes).await?;
    /// ```
    pub async fn generate_async(self: Arc<Self>, original_data: Bytes) -> Result<ThumbnailResult> {
        let processor = self.clone();

        tokio::task::spawn_blocking(move || processor.generate(&original_data))
            .await
            .map_err(|e| AppError::Internal(format!("Thumbnail task panicked: {e}")))?
    }
}

/// Largest centered square inside a `width x height` image: `(x, y, side)`
///
/// The longer dimension is trimmed evenly on both sides; an odd remainder
/// leaves the extra pixel on the right/bottom.
fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Encode image as PNG
fn encode_png(img: &DynamicImage) -> Result<Bytes> {
    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);

    img.write_to(&mut cursor, ImageOutputFormat::Png)
        .map_err(|e| AppError::Internal(format!("Failed to encode PNG: {e}")))?;

    Ok(Bytes::from(buf))
}
