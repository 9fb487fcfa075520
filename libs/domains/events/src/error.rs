use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ValidationFailure};
use database::SortParseError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Object name reported in validation error items.
pub const EVENT_DTO_OBJECT: &str = "eventDto";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(i64),

    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid sort: {0}")]
    InvalidSort(#[from] SortParseError),

    #[error("Account {account} may not modify event {event}")]
    Forbidden { event: i64, account: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::Validation(errors) => {
                AppError::Validation(ValidationFailure::new(EVENT_DTO_OBJECT, errors))
            }
            EventError::InvalidSort(e) => AppError::BadRequest(e.to_string()),
            EventError::Forbidden { event, .. } => {
                AppError::Forbidden(format!("Only the manager may update event {}", event))
            }
            EventError::Database(e) => AppError::Database(e),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
