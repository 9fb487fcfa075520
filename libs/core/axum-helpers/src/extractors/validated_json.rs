//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{AppError, ValidationFailure, object_name_of};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// - malformed JSON, unknown properties and type mismatches are rejected with 400
/// - a missing `Content-Type: application/json` is rejected with 415
/// - `Validate` failures are rejected with 400 and every violation listed,
///   with `objectName` set to the lowerCamelCase type name (`EventDto` -> `eventDto`)
///
/// # Example
/// ```ignore
/// async fn create_event(ValidatedJson(dto): ValidatedJson<EventDto>) -> impl IntoResponse {
///     // dto has passed EventDto::validate
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;

        data.validate()
            .map_err(|errors| ValidationFailure::new(object_name_of::<T>(), errors))?;

        Ok(ValidatedJson(data))
    }
}
