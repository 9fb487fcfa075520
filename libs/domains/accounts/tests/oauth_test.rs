//! Handler tests for the token endpoint
//!
//! Drives `oauth::router` with in-memory accounts bootstrapped from the
//! default `AppProperties`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, TokenType};
use domain_accounts::oauth::{OAuthErrorBody, TokenResponse};
use domain_accounts::*;
use http_body_util::BodyExt;
use tower::ServiceExt; // For oneshot()

// "myApp:pass"
const CLIENT_BASIC: &str = "Basic bXlBcHA6cGFzcw==";
// "myApp:wrong"
const WRONG_CLIENT_BASIC: &str = "Basic bXlBcHA6d3Jvbmc=";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("oauth-test-secret-that-is-at-least-32-chars").unwrap())
}

async fn app() -> Router {
    let properties = AppProperties::default();
    let service = AccountService::new(InMemoryAccountRepository::new());
    service.bootstrap(&properties).await.unwrap();
    oauth::router(service, jwt(), properties.client())
}

fn token_request(authorization: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/oauth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_password_grant_issues_tokens() {
    let response = app()
        .await
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            "grant_type=password&username=user%40email.com&password=user",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let body: TokenResponse = json_body(response.into_body()).await;
    assert_eq!(body.token_type, "bearer");
    assert_eq!(body.expires_in, 600);

    let claims = jwt().verify_access_token(&body.access_token).unwrap();
    assert_eq!(claims.username, "user@email.com");
    assert_eq!(claims.roles, vec!["USER"]);
    assert_eq!(claims.token_type, TokenType::Access);
}

#[tokio::test]
async fn test_admin_token_carries_admin_role() {
    let response = app()
        .await
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            "grant_type=password&username=admin%40email.com&password=admin",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: TokenResponse = json_body(response.into_body()).await;
    let claims = jwt().verify_access_token(&body.access_token).unwrap();
    assert!(claims.has_role("ADMIN"));
    assert!(claims.has_role("USER"));
}

#[tokio::test]
async fn test_bad_client_is_401() {
    for authorization in [Some(WRONG_CLIENT_BASIC), None, Some("Bearer abc")] {
        let response = app()
            .await
            .oneshot(token_request(
                authorization,
                "grant_type=password&username=user%40email.com&password=user",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
        let body: OAuthErrorBody = json_body(response.into_body()).await;
        assert_eq!(body.error, "invalid_client");
    }
}

#[tokio::test]
async fn test_bad_user_credentials_is_invalid_grant() {
    let response = app()
        .await
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            "grant_type=password&username=user%40email.com&password=nope",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: OAuthErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.error, "invalid_grant");
}

#[tokio::test]
async fn test_unsupported_grant_type() {
    let response = app()
        .await
        .oneshot(token_request(Some(CLIENT_BASIC), "grant_type=client_credentials"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: OAuthErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.error, "unsupported_grant_type");
}

#[tokio::test]
async fn test_missing_parameters_is_invalid_request() {
    for form in ["", "grant_type=password&username=user%40email.com"] {
        let response = app()
            .await
            .oneshot(token_request(Some(CLIENT_BASIC), form))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: OAuthErrorBody = json_body(response.into_body()).await;
        assert_eq!(body.error, "invalid_request", "form: {:?}", form);
    }
}

#[tokio::test]
async fn test_refresh_token_grant() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            "grant_type=password&username=user%40email.com&password=user",
        ))
        .await
        .unwrap();
    let first: TokenResponse = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            &format!("grant_type=refresh_token&refresh_token={}", first.refresh_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second: TokenResponse = json_body(response.into_body()).await;
    assert!(jwt().verify_access_token(&second.access_token).is_ok());

    // an access token is not accepted as a refresh token
    let response = app
        .oneshot(token_request(
            Some(CLIENT_BASIC),
            &format!("grant_type=refresh_token&refresh_token={}", first.access_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: OAuthErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.error, "invalid_grant");
}
