//! Error identifiers carried by every error body.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
//! assert_eq!(ErrorCode::ValidationError.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use utoipa::ToSchema;

/// Client errors live in 1000-1999, persistence errors in 2000-2999.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more field rules were violated
    ValidationError,
    /// Unparseable path id or query parameter
    InvalidParameter,
    /// Missing or wrong `Content-Type`
    JsonExtraction,
    NotFound,
    InternalError,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
    /// Body is not valid JSON for the target type, or has unknown properties
    InvalidJson,

    DatabaseNotFound,
    DatabaseError,
    DatabasePoolTimeout,
    DatabaseUnhandled,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Numeric form, logged as `error_code`.
    pub fn code(&self) -> i32 {
        use ErrorCode::*;

        match self {
            ValidationError => 1001,
            InvalidParameter => 1002,
            JsonExtraction => 1003,
            NotFound => 1004,
            InternalError => 1005,
            Unauthorized => 1006,
            Forbidden => 1007,
            Conflict => 1008,
            BadRequest => 1009,
            InvalidJson => 1010,
            DatabaseNotFound => 2001,
            DatabaseError => 2003,
            DatabasePoolTimeout => 2013,
            DatabaseUnhandled => 2099,
        }
    }

    /// Message used when the concrete cause must not reach the client.
    pub fn default_message(&self) -> &'static str {
        use ErrorCode::*;

        match self {
            ValidationError => "Request validation failed",
            InvalidParameter => "Invalid request parameter",
            JsonExtraction => "Failed to parse request body",
            NotFound => "Resource not found",
            InternalError => "An internal server error occurred",
            Unauthorized => "Authentication required",
            Forbidden => "Access forbidden",
            Conflict => "Resource already exists",
            BadRequest => "Bad request",
            InvalidJson => "Invalid JSON format",
            DatabaseNotFound => "Database record not found",
            DatabaseError => "Database error occurred",
            DatabasePoolTimeout => "Database connection pool timed out",
            DatabaseUnhandled => "Unhandled database error",
        }
    }
}
