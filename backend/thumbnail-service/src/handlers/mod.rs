/// HTTP handlers for thumbnail record endpoints
///
/// This module contains handlers for:
/// - Listing every thumbnail record
/// - Fetching a single record by id
/// - Deleting a record by id
pub mod records;

use actix_web::{http::header, middleware::DefaultHeaders, web, HttpResponse};

pub use records::{delete_record, get_record, list_records};

/// Register all routes on an actix service config
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/health",
        web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
    )
    .service(
        web::scope("/thumbnails")
            .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
            .route("", web::get().to(list_records))
            .route("/{id}", web::get().to(get_record))
            .route("/{id}", web::delete().to(delete_record)),
    );
}
