//! Hrefs and `_links` of event resources.

use axum_helpers::{API_ROOT, Links, PageMetadata, page_links};
use database::{Page, PageRequest, SortOrder};

use crate::models::{Event, EventSortField};

/// Documentation tag shared by every event operation.
pub const EVENTS_TAG: &str = "events";

pub const REL_QUERY_EVENTS: &str = "query-events";
pub const REL_UPDATE_EVENT: &str = "update-event";
pub const REL_CREATE_EVENT: &str = "create-event";
pub const REL_PROFILE: &str = "profile";
pub const REL_EVENTS: &str = "events";

pub fn events_href() -> String {
    format!("{}/events", API_ROOT)
}

pub fn event_href(id: i64) -> String {
    format!("{}/events/{}", API_ROOT, id)
}

/// Link into the Swagger UI section of one operation.
pub fn profile_href(operation: &str) -> String {
    format!("/swagger-ui/#/{}/{}", EVENTS_TAG, operation)
}

/// Links of a freshly created event.
pub fn created(event: &Event) -> Links {
    Links::new()
        .with("self", event_href(event.id))
        .with(REL_QUERY_EVENTS, events_href())
        .with(REL_UPDATE_EVENT, event_href(event.id))
        .with(REL_PROFILE, profile_href("create_event"))
}

/// Links of a single event; `update-event` only for its manager.
pub fn single(event: &Event, can_update: bool) -> Links {
    let mut links = Links::new().with("self", event_href(event.id));
    if can_update {
        links = links.with(REL_UPDATE_EVENT, event_href(event.id));
    }
    links.with(REL_PROFILE, profile_href("get_event"))
}

pub fn updated(event: &Event) -> Links {
    Links::new()
        .with("self", event_href(event.id))
        .with(REL_PROFILE, profile_href("update_event"))
}

/// Links of an item inside a listing.
pub fn item(event: &Event) -> Links {
    Links::new().with("self", event_href(event.id))
}

/// Page descriptor of `page`.
pub fn page_metadata<T>(page: &Page<T>) -> PageMetadata {
    PageMetadata {
        size: page.size,
        total_elements: page.total_elements,
        total_pages: page.total_pages(),
        number: page.number,
    }
}

/// Navigation links of a listing, carrying the request's sort along.
pub fn listing(
    request: &PageRequest<EventSortField>,
    metadata: &PageMetadata,
    authenticated: bool,
) -> Links {
    let sort = request
        .sort
        .iter()
        .map(|order: &SortOrder<EventSortField>| format!("sort={}", order))
        .collect::<Vec<_>>()
        .join("&");

    let mut links = page_links(&events_href(), metadata, Some(&sort))
        .with(REL_PROFILE, profile_href("query_events"));
    if authenticated {
        links = links.with(REL_CREATE_EVENT, events_href());
    }
    links
}
