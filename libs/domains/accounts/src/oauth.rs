//! OAuth2 token endpoint (RFC 6749 §4.3 password grant, §6 refresh).
//!
//! Clients authenticate with HTTP Basic; the form carries the grant.
//! Errors use the RFC `{"error", "error_description"}` body instead of
//! [`axum_helpers::ErrorResponse`].

use axum::{
    Json, Router,
    extract::{Form, State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
    typed_header::TypedHeaderRejection,
};
use axum_helpers::{AuditEvent, AuditOutcome, JwtAuth};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::ClientCredentials;
use crate::error::AccountError;
use crate::models::Account;
use crate::repository::AccountRepository;
use crate::service::AccountService;

pub const TOKEN_PATH: &str = "/oauth/token";

/// Scopes granted to every token; fine-grained scopes are not modelled.
pub const DEFAULT_SCOPE: &str = "read write";

/// Form body of `POST /oauth/token`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// `password` or `refresh_token`
    #[schema(example = "password")]
    pub grant_type: Option<String>,
    #[schema(example = "user@email.com")]
    pub username: Option<String>,
    #[schema(example = "user")]
    pub password: Option<String>,
    /// Required for the `refresh_token` grant
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`
    #[schema(example = "bearer")]
    pub token_type: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[schema(example = 600)]
    pub expires_in: i64,
    #[schema(example = "read write")]
    pub scope: String,
}

/// RFC 6749 §5.2 error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OAuthErrorBody {
    #[schema(example = "invalid_grant")]
    pub error: String,
    pub error_description: String,
}

#[derive(Debug)]
pub enum OAuthError {
    InvalidClient,
    InvalidGrant(String),
    InvalidRequest(String),
    UnsupportedGrantType(String),
    ServerError(String),
}

impl OAuthError {
    fn code(&self) -> &'static str {
        match self {
            OAuthError::InvalidClient => "invalid_client",
            OAuthError::InvalidGrant(_) => "invalid_grant",
            OAuthError::InvalidRequest(_) => "invalid_request",
            OAuthError::UnsupportedGrantType(_) => "unsupported_grant_type",
            OAuthError::ServerError(_) => "server_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            OAuthError::InvalidClient => StatusCode::UNAUTHORIZED,
            OAuthError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn description(&self) -> String {
        match self {
            OAuthError::InvalidClient => "Bad client credentials".to_string(),
            OAuthError::InvalidGrant(msg) | OAuthError::InvalidRequest(msg) => msg.clone(),
            OAuthError::UnsupportedGrantType(grant) => {
                format!("Unsupported grant type: {}", grant)
            }
            OAuthError::ServerError(_) => "An internal error occurred".to_string(),
        }
    }
}

impl From<AccountError> for OAuthError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials | AccountError::NotFound(_) => {
                OAuthError::InvalidGrant("Bad credentials".to_string())
            }
            other => OAuthError::ServerError(other.to_string()),
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        if let OAuthError::ServerError(msg) = &self {
            tracing::error!("Token endpoint failure: {}", msg);
        }

        let status = self.status();
        let body = OAuthErrorBody {
            error: self.code().to_string(),
            error_description: self.description(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"oauth2/client\""),
            );
        }
        response
    }
}

struct OAuthState<R: AccountRepository> {
    service: AccountService<R>,
    jwt: JwtAuth,
    client: ClientCredentials,
}

/// Router serving [`TOKEN_PATH`]; merge it at the server root.
pub fn router<R: AccountRepository + 'static>(
    service: AccountService<R>,
    jwt: JwtAuth,
    client: ClientCredentials,
) -> Router {
    let state = Arc::new(OAuthState {
        service,
        jwt,
        client,
    });

    Router::new()
        .route(TOKEN_PATH, post(token::<R>))
        .with_state(state)
}

/// Issue an access token
#[utoipa::path(
    post,
    path = "/oauth/token",
    tag = "oauth",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    security(("client_basic" = [])),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Bad grant or missing parameter", body = OAuthErrorBody),
        (status = 401, description = "Bad client credentials", body = OAuthErrorBody)
    )
)]
async fn token<R: AccountRepository>(
    State(state): State<Arc<OAuthState<R>>>,
    headers: HeaderMap,
    credentials: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Response, OAuthError> {
    let client_ok = credentials
        .map(|TypedHeader(Authorization(basic))| {
            state.client.matches(basic.username(), basic.password())
        })
        .unwrap_or(false);
    if !client_ok {
        AuditEvent::new("oauth.token", AuditOutcome::Failure)
            .with_request_headers(&headers)
            .with_details(serde_json::json!({ "error": "invalid_client" }))
            .log();
        return Err(OAuthError::InvalidClient);
    }

    let Form(request) = form.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;

    let result = match request.grant_type.as_deref() {
        Some("password") => password_grant(&state, &request).await,
        Some("refresh_token") => refresh_grant(&state, &request).await,
        Some(other) => Err(OAuthError::UnsupportedGrantType(other.to_string())),
        None => Err(OAuthError::InvalidRequest(
            "Missing grant type".to_string(),
        )),
    };

    match result {
        Ok(account) => {
            let pair = state
                .jwt
                .issue_token_pair(&account.id.to_string(), &account.email, &account.role_names())
                .map_err(|e| OAuthError::ServerError(e.to_string()))?;

            AuditEvent::new("oauth.token", AuditOutcome::Success)
                .by(account.id.to_string())
                .with_request_headers(&headers)
                .with_details(serde_json::json!({ "grant_type": request.grant_type }))
                .log();

            let body = TokenResponse {
                access_token: pair.access_token,
                token_type: "bearer".to_string(),
                refresh_token: pair.refresh_token,
                expires_in: pair.expires_in,
                scope: DEFAULT_SCOPE.to_string(),
            };
            Ok((
                [
                    (header::CACHE_CONTROL, "no-store"),
                    (header::PRAGMA, "no-cache"),
                ],
                Json(body),
            )
                .into_response())
        }
        Err(err) => {
            let mut audit = AuditEvent::new("oauth.token", AuditOutcome::Failure);
            if let Some(username) = &request.username {
                audit = audit.by(username);
            }
            audit
                .with_request_headers(&headers)
                .with_details(serde_json::json!({ "error": err.code() }))
                .log();
            Err(err)
        }
    }
}

async fn password_grant<R: AccountRepository>(
    state: &OAuthState<R>,
    request: &TokenRequest,
) -> Result<Account, OAuthError> {
    let (Some(username), Some(password)) = (&request.username, &request.password) else {
        return Err(OAuthError::InvalidRequest(
            "Missing username or password".to_string(),
        ));
    };

    Ok(state.service.verify_credentials(username, password).await?)
}

async fn refresh_grant<R: AccountRepository>(
    state: &OAuthState<R>,
    request: &TokenRequest,
) -> Result<Account, OAuthError> {
    let Some(token) = &request.refresh_token else {
        return Err(OAuthError::InvalidRequest(
            "Missing refresh token".to_string(),
        ));
    };

    let claims = state
        .jwt
        .verify_refresh_token(token)
        .map_err(|_| OAuthError::InvalidGrant("Invalid refresh token".to_string()))?;
    let id = claims
        .subject_id()
        .ok_or_else(|| OAuthError::InvalidGrant("Invalid refresh token".to_string()))?;

    // Reload so role changes take effect on refresh
    Ok(state.service.get_account(id).await?)
}

#[derive(OpenApi)]
#[openapi(
    paths(token),
    components(schemas(TokenRequest, TokenResponse, OAuthErrorBody)),
    tags((name = "oauth", description = "OAuth2 token endpoint"))
)]
pub struct OAuthApiDoc;
