//! Handler tests for the events API
//!
//! Drives `handlers::router` mounted under `/api` behind the optional JWT
//! middleware, backed by the in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware;
use axum_helpers::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
use database::MAX_PAGE_INDEX;
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use test_utils::assertions::assert_has_link;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("events-test-secret-that-is-at-least-32-chars").unwrap())
}

fn app(repository: InMemoryEventRepository) -> Router {
    let service = EventService::new(repository);
    Router::new()
        .nest("/api", handlers::router(service))
        .layer(middleware::from_fn_with_state(
            jwt(),
            optional_jwt_auth_middleware,
        ))
}

fn token(account_id: Uuid, roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    let pair = jwt()
        .issue_token_pair(&account_id.to_string(), "user@email.com", &roles)
        .unwrap();
    format!("Bearer {}", pair.access_token)
}

fn valid_body() -> Value {
    let data = TestDataBuilder::new(1);
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": data.datetime(0),
        "closeEnrollmentDateTime": data.datetime(1),
        "beginEventDateTime": data.datetime(2),
        "endEventDateTime": data.datetime(3),
        "location": "D2 Startup Factory",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100
    })
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Stores an event directly, bypassing HTTP.
async fn seed(repository: &InMemoryEventRepository, index: usize, manager: Option<Uuid>) -> Event {
    let dto: EventDto = serde_json::from_value(json!({
        "name": format!("event {:02}", index),
        "description": "test event",
    }))
    .unwrap();
    repository.create(Event::new(0, dto, manager)).await.unwrap()
}

#[tokio::test]
async fn test_create_event() {
    let account = Uuid::now_v7();
    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "POST",
            "/api/events",
            Some(&token(account, &["USER"])),
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/events/1");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/hal+json"
    );

    let text = body_text(response.into_body()).await;
    for rel in ["self", "query-events", "update-event", "profile"] {
        assert_has_link(&text, rel);
    }

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["eventStatus"], "DRAFT");
    assert_eq!(body["free"], false);
    assert_eq!(body["offline"], true);
    assert_eq!(body["manager"]["id"], account.to_string());
}

#[tokio::test]
async fn test_create_event_with_trailing_slash() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "POST",
            "/api/events/",
            Some(&token(Uuid::now_v7(), &["USER"])),
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_event_requires_token() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request("POST", "/api/events", None, &valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(get_request("/api/events", Some("Bearer not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_event_with_unknown_property() {
    let mut body = valid_body();
    body["id"] = json!(100);
    body["free"] = json!(true);
    body["eventStatus"] = json!("PUBLISHED");

    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "POST",
            "/api/events",
            Some(&token(Uuid::now_v7(), &["USER"])),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_event_with_empty_input() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "POST",
            "/api/events",
            Some(&token(Uuid::now_v7(), &["USER"])),
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["content"].as_array().unwrap().len() >= 6);
}

#[tokio::test]
async fn test_create_event_with_wrong_input() {
    let mut body = valid_body();
    body["basePrice"] = json!(10000);
    body["maxPrice"] = json!(200);

    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "POST",
            "/api/events",
            Some(&token(Uuid::now_v7(), &["USER"])),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    let first = &body["content"][0];
    assert_eq!(first["objectName"], "eventDto");
    assert_eq!(first["field"], "basePrice");
    assert_eq!(first["code"], "wrongValue");
    assert_eq!(first["defaultMessage"], "BasePrice is wrong");
    assert_eq!(first["rejectedValue"], 10000);
    assert_eq!(body["_links"]["index"]["href"], "/api");

    let global = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item.get("field").is_none())
        .unwrap();
    assert_eq!(global["code"], "wrongPrices");
}

#[tokio::test]
async fn test_query_events() {
    let repository = InMemoryEventRepository::new();
    for index in 0..30 {
        seed(&repository, index, None).await;
    }

    let response = app(repository)
        .oneshot(get_request("/api/events?page=1&size=10&sort=name,DESC", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;

    let events = body["_embedded"]["eventList"].as_array().unwrap();
    assert_eq!(events.len(), 10);
    assert_eq!(events[0]["name"], "event 19");
    assert!(events[0]["_links"]["self"]["href"].is_string());

    assert_eq!(body["page"]["size"], 10);
    assert_eq!(body["page"]["totalElements"], 30);
    assert_eq!(body["page"]["totalPages"], 3);
    assert_eq!(body["page"]["number"], 1);

    assert_eq!(
        body["_links"]["self"]["href"],
        "/api/events?page=1&size=10&sort=name,desc"
    );
    for rel in ["first", "prev", "next", "last", "profile"] {
        assert!(body["_links"][rel].is_object(), "missing {}", rel);
    }
    assert!(body["_links"].get("create-event").is_none());
}

#[tokio::test]
async fn test_query_events_with_authentication() {
    let repository = InMemoryEventRepository::new();
    seed(&repository, 0, None).await;

    let response = app(repository)
        .oneshot(get_request(
            "/api/events",
            Some(&token(Uuid::now_v7(), &["USER"])),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["_links"]["create-event"]["href"], "/api/events");
    // single page: no navigation
    assert!(body["_links"].get("next").is_none());
}

#[tokio::test]
async fn test_query_empty_collection_has_no_embedded() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(get_request("/api/events", None))
        .await
        .unwrap();

    let body = body_json(response.into_body()).await;
    assert!(body.get("_embedded").is_none());
    assert_eq!(body["page"]["totalElements"], 0);
}

#[tokio::test]
async fn test_query_with_bad_parameters() {
    for uri in [
        "/api/events?sort=password",
        "/api/events?size=0",
        "/api/events?page=abc",
    ] {
        let response = app(InMemoryEventRepository::new())
            .oneshot(get_request(uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_query_page_index_out_of_range() {
    let repository = InMemoryEventRepository::new();
    seed(&repository, 1, None).await;

    let too_far = format!("/api/events?page={}", MAX_PAGE_INDEX + 1);
    for uri in ["/api/events?page=18446744073709551615", too_far.as_str()] {
        let response = app(repository.clone())
            .oneshot(get_request(uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }

    let furthest = format!("/api/events?page={}&size=2000", MAX_PAGE_INDEX);
    let response = app(repository)
        .oneshot(get_request(&furthest, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert!(body.get("_embedded").is_none());
    assert!(body["_links"].get("next").is_none());
    assert!(body["_links"]["prev"].is_object());
}

#[tokio::test]
async fn test_get_event() {
    let manager = Uuid::now_v7();
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, Some(manager)).await;
    let uri = format!("/api/events/{}", event.id);

    let anonymous = app(repository.clone())
        .oneshot(get_request(&uri, None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::OK);
    let body = body_json(anonymous.into_body()).await;
    assert_eq!(body["name"], "event 01");
    assert!(body["_links"]["self"].is_object());
    assert!(body["_links"]["profile"].is_object());
    assert!(body["_links"].get("update-event").is_none());

    let as_manager = app(repository)
        .oneshot(get_request(&uri, Some(&token(manager, &["USER"]))))
        .await
        .unwrap();
    let body = body_json(as_manager.into_body()).await;
    assert_eq!(body["_links"]["update-event"]["href"], uri);
}

#[tokio::test]
async fn test_get_missing_event() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(get_request("/api/events/11883", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_event() {
    let manager = Uuid::now_v7();
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, Some(manager)).await;

    let mut body = valid_body();
    body["name"] = json!("Updated Event");

    let response = app(repository.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/events/{}", event.id),
            Some(&token(manager, &["USER"])),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response.into_body()).await;
    assert_has_link(&text, "self");
    assert_has_link(&text, "profile");

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["name"], "Updated Event");
    assert_eq!(body["id"], event.id);

    let stored = repository.find_by_id(event.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Updated Event");
    assert!(stored.offline);
}

#[tokio::test]
async fn test_update_event_with_wrong_dates() {
    let manager = Uuid::now_v7();
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, Some(manager)).await;

    let data = TestDataBuilder::new(1);
    let mut body = valid_body();
    body["beginEnrollmentDateTime"] = json!(data.datetime(1));
    body["closeEnrollmentDateTime"] = json!(data.datetime(0));

    let response = app(repository)
        .oneshot(json_request(
            "PUT",
            &format!("/api/events/{}", event.id),
            Some(&token(manager, &["USER"])),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    let item = &body["content"][0];
    assert!(item["objectName"].is_string());
    assert!(item["defaultMessage"].is_string());
    assert!(item["code"].is_string());
    assert_eq!(item["field"], "closeEnrollmentDateTime");
}

#[tokio::test]
async fn test_update_missing_event_wins_over_bad_body() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(json_request(
            "PUT",
            "/api/events/123",
            Some(&token(Uuid::now_v7(), &["USER"])),
            &json!({ "unknown": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_event_requires_token() {
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, None).await;

    let response = app(repository)
        .oneshot(json_request(
            "PUT",
            &format!("/api/events/{}", event.id),
            None,
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_by_other_account_is_forbidden() {
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, Some(Uuid::now_v7())).await;

    let response = app(repository)
        .oneshot(json_request(
            "PUT",
            &format!("/api/events/{}", event.id),
            Some(&token(Uuid::now_v7(), &["USER"])),
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_may_update_any_event() {
    let repository = InMemoryEventRepository::new();
    let event = seed(&repository, 1, Some(Uuid::now_v7())).await;

    let response = app(repository)
        .oneshot(json_request(
            "PUT",
            &format!("/api/events/{}", event.id),
            Some(&token(Uuid::now_v7(), &["ADMIN", "USER"])),
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
