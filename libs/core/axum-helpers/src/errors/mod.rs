pub mod codes;
pub mod handlers;
pub mod responses;
mod validation;

pub use codes::ErrorCode;
pub use validation::{FieldErrorItem, ValidationFailure, object_name_of};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::hal::{HAL_JSON, Link, Links, api_root};

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Event 7 not found"
/// }
/// ```
///
/// Validation failures additionally carry the itemized `content` list and an
/// `index` link back to the API root:
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "content": [
///     { "objectName": "eventDto", "field": "name", "code": "NotBlank",
///       "defaultMessage": "must not be blank", "rejectedValue": "" }
///   ],
///   "_links": { "index": { "href": "/api" } }
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// One entry per violated rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<FieldErrorItem>>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::HashMap<String, Link>>)]
    pub links: Option<Links>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            content: None,
            links: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Path parameter error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(ValidationFailure::new("request", errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(failure) => return validation_response(failure),
            AppError::Database(e) => map_db_error(&e),
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                match e {
                    JsonRejection::MissingJsonContentType(_) => (
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        ErrorCode::JsonExtraction,
                        e.body_text(),
                    ),
                    // unknown properties and type mismatches are client errors, not 422
                    _ => (StatusCode::BAD_REQUEST, ErrorCode::InvalidJson, e.body_text()),
                }
            }
            AppError::QueryRejection(e) => {
                tracing::info!("Query string rejected: {}", e.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidParameter,
                    e.body_text(),
                )
            }
            AppError::PathRejection(e) => {
                tracing::info!("Path parameter rejected: {}", e.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidParameter,
                    e.body_text(),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                // internal details stay in the logs
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                )
            }
        };

        error_response(status, message, code)
    }
}

fn validation_response(failure: ValidationFailure) -> Response {
    let content = failure.items();
    tracing::info!(
        error_code = ErrorCode::ValidationError.code(),
        object = %failure.object_name,
        violations = content.len(),
        "Validation failed"
    );

    let mut links = Links::new();
    links.insert("index", api_root());

    let body = ErrorResponse {
        content: Some(content),
        links: Some(links),
        ..ErrorResponse::new(
            ErrorCode::ValidationError,
            ErrorCode::ValidationError.default_message(),
        )
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, HAL_JSON)],
        Json(body),
    )
        .into_response()
}

fn map_db_error(error: &DbErr) -> (StatusCode, ErrorCode, String) {
    match error {
        DbErr::RecordNotFound(what) => {
            tracing::info!(
                error_code = ErrorCode::DatabaseNotFound.code(),
                "Database record not found: {}",
                what
            );
            (
                StatusCode::NOT_FOUND,
                ErrorCode::DatabaseNotFound,
                ErrorCode::DatabaseNotFound.default_message().to_string(),
            )
        }
        DbErr::ConnectionAcquire(e) => {
            tracing::warn!(
                error_code = ErrorCode::DatabasePoolTimeout.code(),
                "Database connection acquire failed: {:?}",
                e
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabasePoolTimeout,
                ErrorCode::DatabasePoolTimeout.default_message().to_string(),
            )
        }
        DbErr::Conn(_) | DbErr::Exec(_) | DbErr::Query(_) => {
            tracing::error!(
                error_code = ErrorCode::DatabaseError.code(),
                "Database error: {:?}",
                error
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                ErrorCode::DatabaseError.default_message().to_string(),
            )
        }
        _ => {
            tracing::error!(
                error_code = ErrorCode::DatabaseUnhandled.code(),
                "Unhandled database error: {:?}",
                error
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseUnhandled,
                ErrorCode::DatabaseUnhandled.default_message().to_string(),
            )
        }
    }
}

/// Builds a plain JSON error response.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use validator::ValidationError;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response_shape() {
        let response = AppError::NotFound("Event 7 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["code"], 1004);
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "Event 7 not found");
        assert!(json.get("_links").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response =
            AppError::InternalServerError("connection refused on 10.0.0.3".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_validation_response_is_hal() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "name",
            ValidationError::new("NotBlank").with_message("must not be blank".into()),
        );

        let response = AppError::Validation(ValidationFailure::new("eventDto", errors)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            HAL_JSON
        );

        let json = body_json(response).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["content"][0]["objectName"], "eventDto");
        assert_eq!(json["content"][0]["field"], "name");
        assert_eq!(json["content"][0]["code"], "NotBlank");
        assert_eq!(json["content"][0]["defaultMessage"], "must not be blank");
        assert_eq!(json["_links"]["index"]["href"], "/api");
    }

    #[tokio::test]
    async fn test_record_not_found_maps_to_404() {
        let response = AppError::Database(DbErr::RecordNotFound("event".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
