//! Events Domain
//!
//! CRUD for events served as HAL resources.
//!
//! # Features
//!
//! - Derived fields (`free`, `offline`) recomputed on every create and update
//! - Validation that reports every violated rule at once
//! - Paged, sortable listing with navigation links
//! - Updates restricted to the event's manager or an `ADMIN`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, HAL links, audit
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation ordering, permission checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, EventDto, EventStatus, sort fields
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_events::{EventService, InMemoryEventRepository, handlers};
//!
//! let service = EventService::new(InMemoryEventRepository::new());
//!
//! // Routes under /events; mount the result under /api behind
//! // axum_helpers::optional_jwt_auth_middleware
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod links;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{
    Event, EventDto, EventPage, EventQuery, EventResource, EventSortField, EventStatus,
    IndexResource, ManagerRef,
};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::{Caller, EventService};
