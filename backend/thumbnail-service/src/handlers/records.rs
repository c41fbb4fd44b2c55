/// Record handlers - HTTP endpoints for thumbnail records
use actix_web::{web, HttpResponse};

use crate::error::{AppError, Result};
use crate::models::{DeleteResponse, ListQuery, ScanCursor};
use crate::services::RecordService;

/// Header carrying the cursor of a listing cut short by the page bound
pub const NEXT_CURSOR_HEADER: &str = "X-Next-Cursor";

/// List all thumbnail records
pub async fn list_records(
    service: web::Data<RecordService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let start = query.into_inner().cursor.map(ScanCursor);
    let listing = service.list(start).await?;

    let mut response = HttpResponse::Ok();
    if let Some(cursor) = listing.next {
        response.insert_header((NEXT_CURSOR_HEADER, cursor.0));
    }
    Ok(response.json(listing.items))
}

/// Get a specific thumbnail record
pub async fn get_record(
    service: web::Data<RecordService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = validated_id(id.into_inner())?;
    let record = service.get(&id).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Delete a thumbnail record
pub async fn delete_record(
    service: web::Data<RecordService>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = validated_id(id.into_inner())?;

    if let Err(err) = service.delete(&id).await {
        tracing::error!(id = %id, error = %err, "Thumbnail record delete failed");
        return Err(AppError::Persistence(format!(
            "An error occurred while deleting thumbnail record {id}"
        )));
    }

    Ok(HttpResponse::Ok().json(DeleteResponse {
        deleted: true,
        item_deleted_id: id,
    }))
}

/// Ids are looked up exactly as given; only a blank id is rejected
fn validated_id(id: String) -> Result<String> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("Record id is required".to_string()));
    }
    Ok(id)
}
