/// Error types for Thumbnail Service
///
/// This module defines all error types that can occur in the thumbnail-service.
/// Errors are converted to appropriate HTTP responses for API clients; the
/// event-triggered generator only observes success or failure.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::fmt;

/// Result type for thumbnail-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes returned in error bodies
pub mod error_codes {
    pub const DECODE_ERROR: &str = "IMAGE_DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "OBJECT_STORAGE_ERROR";
    pub const PERSISTENCE_ERROR: &str = "RECORD_STORE_ERROR";
    pub const RECORD_NOT_FOUND: &str = "THUMBNAIL_NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Input bytes are not a decodable image
    Decode(String),

    /// Object store fetch or upload failed
    Storage(String),

    /// Key-value store put/scan/get/delete failed
    Persistence(String),

    /// Resource not found
    NotFound(String),

    /// Bad request
    BadRequest(String),

    /// Missing or invalid configuration
    Config(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// JSON body returned for every failed HTTP request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Decode(_)
            | AppError::Storage(_)
            | AppError::Persistence(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, code) = match self {
            AppError::Decode(_) => ("processing_error", error_codes::DECODE_ERROR),
            AppError::Storage(_) => ("server_error", error_codes::STORAGE_ERROR),
            AppError::Persistence(_) => ("server_error", error_codes::PERSISTENCE_ERROR),
            AppError::NotFound(_) => ("not_found_error", error_codes::RECORD_NOT_FOUND),
            AppError::BadRequest(_) => ("validation_error", error_codes::INVALID_REQUEST),
            AppError::Config(_) => ("server_error", error_codes::CONFIG_ERROR),
            AppError::Internal(_) => ("server_error", error_codes::INTERNAL_SERVER_ERROR),
        };

        let message = self.to_string();
        let response = ErrorResponse::new(
            match status {
                StatusCode::BAD_REQUEST => "Bad Request",
                StatusCode::NOT_FOUND => "Not Found",
                StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
                _ => "Error",
            },
            &message,
            status.as_u16(),
            error_type,
            code,
        );

        HttpResponse::build(status).json(response)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Decode(err.to_string())
    }
}
