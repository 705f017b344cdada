// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::fmt;
use tracing::error;

use super::validation::{FieldError, ValidationResult};

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
    Validation(Vec<FieldError>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation Error: {}", fields.join(", "))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Validation failures carry field-level detail under "error";
        // everything else is a plain { "msg": ... } body.
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "error": errors }))
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "msg": msg })),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "msg": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "msg": msg })),
            ApiError::InternalServer(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "msg": msg }))
            }
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "msg": "database operation failed" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "validation result was valid but converted to error".to_string(),
            )
        } else {
            ApiError::Validation(result.errors)
        }
    }
}
