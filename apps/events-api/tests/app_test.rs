//! End-to-end flow through the assembled router with in-memory stores:
//! token issuance, event creation and the documentation endpoints.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::server::app::OPENAPI_JSON_PATH;
use axum_helpers::{JwtAuth, JwtConfig};
use domain_accounts::{AccountService, AppProperties, InMemoryAccountRepository};
use domain_events::{EventService, InMemoryEventRepository};
use events_api::api;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// "myApp:pass"
const CLIENT_BASIC: &str = "Basic bXlBcHA6cGFzcw==";

async fn app() -> Router {
    let jwt = JwtAuth::new(&JwtConfig::new("app-test-secret-that-is-at-least-32-chars").unwrap());
    let properties = AppProperties::default();

    let accounts = AccountService::new(InMemoryAccountRepository::new());
    accounts.bootstrap(&properties).await.unwrap();

    let events = EventService::new(InMemoryEventRepository::new());

    api::build_app(
        api::api_routes(events),
        api::public_routes(accounts, jwt.clone(), properties.client()),
        jwt,
    )
    .unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn access_token(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post("/oauth/token")
                .header(header::AUTHORIZATION, CLIENT_BASIC)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "grant_type=password&username={}&password={}",
                    username.replace('@', "%40"),
                    password
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    body["access_token"].as_str().unwrap().to_string()
}

fn event_body() -> Value {
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": "2018-11-23T14:21:00",
        "closeEnrollmentDateTime": "2018-11-24T14:21:00",
        "beginEventDateTime": "2018-11-25T14:21:00",
        "endEventDateTime": "2018-11-26T14:21:00",
        "location": "D2 Startup Factory",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100
    })
}

#[tokio::test]
async fn test_index() {
    let response = app()
        .await
        .oneshot(Request::get("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/hal+json"
    );
    let body = body_json(response.into_body()).await;
    assert_eq!(body["_links"]["events"]["href"], "/api/events");
}

#[tokio::test]
async fn test_token_then_create_then_update() {
    let app = app().await;
    let token = access_token(&app, "user@email.com", "user").await;

    let created = app
        .clone()
        .oneshot(
            Request::post("/api/events")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(event_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let fetched = app
        .clone()
        .oneshot(
            Request::get(&location)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = body_json(fetched.into_body()).await;
    assert_eq!(body["_links"]["update-event"]["href"], location);

    // the other bootstrap account does not manage this event, but is an admin
    let admin = access_token(&app, "admin@email.com", "admin").await;
    let mut changes = event_body();
    changes["name"] = json!("Updated by admin");
    let updated = app
        .oneshot(
            Request::put(&location)
                .header(header::AUTHORIZATION, format!("Bearer {}", admin))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(changes.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app()
        .await
        .oneshot(Request::get(OPENAPI_JSON_PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert!(body["paths"]["/api/events"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = app()
        .await
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
