use crate::errors::{AppError, ValidationFailure, object_name_of};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query string extractor that runs `Validate` after deserializing.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;

        params
            .validate()
            .map_err(|errors| ValidationFailure::new(object_name_of::<T>(), errors))?;

        Ok(ValidatedQuery(params))
    }
}
