use axum_helpers::{HalJson, Links};
use domain_events::IndexResource;
use domain_events::links::{REL_EVENTS, events_href};

pub const INDEX_TAG: &str = "index";

/// API entry point
#[utoipa::path(
    get,
    path = "/api",
    tag = INDEX_TAG,
    responses(
        (status = 200, description = "Links to the top-level resources", body = IndexResource,
            content_type = "application/hal+json")
    )
)]
pub async fn index() -> HalJson<IndexResource> {
    HalJson(IndexResource {
        links: Links::new().with(REL_EVENTS, events_href()),
    })
}
