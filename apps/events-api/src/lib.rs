//! Events API server
//!
//! ```text
//! /oauth/token        token endpoint (domain_accounts::oauth)
//! /api                index
//! /api/events[/{id}]  event resources (domain_events::handlers)
//! /health, /ready     liveness, readiness
//! /swagger-ui, /redoc, /rapidoc, /scalar, /api-docs/openapi.json
//! ```

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;
