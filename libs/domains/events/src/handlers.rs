use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, AuthUser, ErrorResponse, FieldErrorItem, HalJson, IdPath,
    JwtClaims, Link, PageMetadata, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{EventError, EventResult};
use crate::links::{self, EVENTS_TAG};
use crate::models::{
    EmbeddedEvents, Event, EventDto, EventPage, EventQuery, EventResource, EventStatus, ManagerRef,
};
use crate::repository::EventRepository;
use crate::service::{Caller, EventService};

/// Role allowed to update any event.
pub const ADMIN_ROLE: &str = "ADMIN";

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(create_event, query_events, get_event, update_event),
    components(
        schemas(
            Event,
            EventDto,
            EventStatus,
            ManagerRef,
            EventResource,
            EventPage,
            EmbeddedEvents,
            PageMetadata,
            Link,
            ErrorResponse,
            FieldErrorItem
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = EVENTS_TAG, description = "Event management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the event router. Paths are relative to the API root.
///
/// Expects [`JwtClaims`] in request extensions for authenticated callers,
/// i.e. `axum_helpers::optional_jwt_auth_middleware` layered on top.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/events", get(query_events).post(create_event))
        .route("/events/", post(create_event))
        .route("/events/{id}", get(get_event).put(update_event))
        .with_state(shared_service)
}

fn caller_of(claims: &JwtClaims) -> Caller {
    Caller {
        account_id: claims.subject_id(),
        is_admin: claims.has_role(ADMIN_ROLE),
    }
}

/// Create an event managed by the caller
#[utoipa::path(
    post,
    path = "/events",
    tag = EVENTS_TAG,
    request_body = EventDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = EventResource,
            content_type = "application/hal+json",
            headers(("Location" = String, description = "URI of the new event"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    AuthUser(claims): AuthUser,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(dto, claims.subject_id()).await?;

    AuditEvent::new("event.create", AuditOutcome::Success)
        .by(&claims.sub)
        .on(format!("event:{}", event.id))
        .with_request_headers(&headers)
        .with_details(json!({ "name": event.name }))
        .log();

    let location = links::event_href(event.id);
    let resource = EventResource {
        links: links::created(&event),
        event,
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        HalJson(resource),
    ))
}

/// Query events page by page
#[utoipa::path(
    get,
    path = "/events",
    tag = EVENTS_TAG,
    params(EventQuery),
    responses(
        (status = 200, description = "One page of events", body = EventPage,
            content_type = "application/hal+json"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: Option<AuthUser>,
    ValidatedQuery(query): ValidatedQuery<EventQuery>,
) -> EventResult<HalJson<EventPage>> {
    let request = query.to_page_request()?;
    let page = service.list_events(request.clone()).await?;
    let metadata = links::page_metadata(&page);

    let page = page.map(|event| EventResource {
        links: links::item(&event),
        event,
    });
    let embedded = (!page.is_empty()).then(|| EmbeddedEvents {
        event_list: page.content,
    });

    Ok(HalJson(EventPage {
        embedded,
        links: links::listing(&request, &metadata, user.is_some()),
        page: metadata,
    }))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = EVENTS_TAG,
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = EventResource,
            content_type = "application/hal+json"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    user: Option<AuthUser>,
    IdPath(id): IdPath,
) -> EventResult<HalJson<EventResource>> {
    let event = service.get_event(id).await?;
    let account_id = user.and_then(|AuthUser(claims)| claims.subject_id());

    Ok(HalJson(EventResource {
        links: links::single(&event, event.is_managed_by(account_id)),
        event,
    }))
}

/// Replace an event's fields
///
/// Only the event's manager or an administrator may update it.
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = EVENTS_TAG,
    params(("id" = i64, Path, description = "Event ID")),
    request_body = EventDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated", body = EventResource,
            content_type = "application/hal+json"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    AuthUser(claims): AuthUser,
    IdPath(id): IdPath,
    headers: HeaderMap,
    body: Result<Json<EventDto>, JsonRejection>,
) -> Result<HalJson<EventResource>, AppError> {
    let dto = match body {
        Ok(Json(dto)) => dto,
        Err(rejection) => {
            // a missing event wins over a malformed body
            service.get_event(id).await?;
            return Err(rejection.into());
        }
    };

    let audit = |outcome: AuditOutcome| {
        AuditEvent::new("event.update", outcome)
            .by(&claims.sub)
            .on(format!("event:{}", id))
            .with_request_headers(&headers)
    };

    let event = match service.update_event(id, dto, caller_of(&claims)).await {
        Ok(event) => event,
        Err(err @ EventError::Forbidden { .. }) => {
            audit(AuditOutcome::Denied)
                .with_details(json!({ "reason": "not_manager" }))
                .log();
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    audit(AuditOutcome::Success).log();

    Ok(HalJson(EventResource {
        links: links::updated(&event),
        event,
    }))
}
