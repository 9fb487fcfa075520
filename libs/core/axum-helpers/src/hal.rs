//! HAL (`application/hal+json`) building blocks.
//!
//! Hrefs are relative to the server root (`/api/events/1`), so the same
//! response is valid behind any proxy or host name.

use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use utoipa::ToSchema;

pub const HAL_JSON: &str = "application/hal+json";

/// Mount point of the versioned API routes.
pub const API_ROOT: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

pub fn api_root() -> Link {
    Link::new(API_ROOT)
}

/// `_links` object. Relations serialize in insertion order; inserting an
/// existing relation replaces its link in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(String, Link)>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel: impl Into<String>, link: Link) {
        let rel = rel.into();
        match self.0.iter_mut().find(|(r, _)| *r == rel) {
            Some((_, existing)) => *existing = link,
            None => self.0.push((rel, link)),
        }
    }

    /// Builder-style [`Links::insert`].
    pub fn with(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.insert(rel, Link::new(href));
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|(r, _)| r == rel).map(|(_, link)| link)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.get(rel).is_some()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(r, _)| r.as_str())
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// Page descriptor of a paged collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based page index
    pub number: u64,
}

impl PageMetadata {
    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }
}

/// Navigation links of a paged collection.
///
/// `first` and `last` appear when there is anywhere to navigate to, `prev`
/// and `next` only when those pages exist, `self` always. `extra_query` is
/// appended verbatim to every href (e.g. `sort=name,desc`).
pub fn page_links(base: &str, page: &PageMetadata, extra_query: Option<&str>) -> Links {
    let href = |number: u64| {
        let mut href = format!("{}?page={}&size={}", base, number, page.size);
        if let Some(extra) = extra_query.filter(|q| !q.is_empty()) {
            href.push('&');
            href.push_str(extra);
        }
        href
    };

    let navigable = page.has_previous() || page.has_next();
    let mut links = Links::new();

    if navigable {
        links.insert("first", Link::new(href(0)));
    }
    if page.has_previous() {
        links.insert("prev", Link::new(href(page.number - 1)));
    }
    links.insert("self", Link::new(href(page.number)));
    if page.has_next() {
        links.insert("next", Link::new(href(page.number.saturating_add(1))));
    }
    if navigable {
        links.insert("last", Link::new(href(page.total_pages.saturating_sub(1))));
    }

    links
}

/// JSON response with `Content-Type: application/hal+json`.
pub struct HalJson<T>(pub T);

impl<T: Serialize> IntoResponse for HalJson<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        // keep the 500 text/plain that Json produces when serialization fails
        if response.status().is_success() {
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static(HAL_JSON),
            );
        }
        response
    }
}
