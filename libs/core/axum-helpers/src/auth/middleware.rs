use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Verifies a bearer token when one is sent and inserts its
/// [`JwtClaims`](super::JwtClaims) into request extensions.
///
/// Anonymous requests pass through; handlers that need a caller take
/// [`AuthUser`](super::AuthUser). A token that is present but invalid or
/// expired is rejected with 401.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(request.headers()) {
        let claims = auth.verify_access_token(token).map_err(|e| {
            tracing::debug!("JWT verification failed: {}", e);
            AppError::Unauthorized("Invalid access token".into())
        })?;
        request.extensions_mut().insert(claims);
    }

    Ok(next.run(request).await)
}
