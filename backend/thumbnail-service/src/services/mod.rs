/// Service layer for thumbnails and their records
///
/// This module provides business logic for:
/// - Thumbnail service: creation-event handling (fetch, crop, upload, record)
/// - Record service: listing, lookup and deletion of thumbnail records
pub mod records;
pub mod thumbnail;

pub use records::RecordService;
pub use thumbnail::ThumbnailService;
