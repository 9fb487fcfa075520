//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`auth`]**: HS256 bearer tokens, auth middleware, [`AuthUser`] extractor
//! - **[`hal`]**: `application/hal+json` links, page descriptors, [`HalJson`]
//! - **[`server`]**: router assembly with API docs, health, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the uniform error body
//! - **[`extractors`]**: validated JSON/query bodies, numeric path ids
//! - **[`audit`]**: audit trail on the `audit` tracing target
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let api_routes = Router::new(); // mounted under /api
//!     let router = create_router::<ApiDoc>(api_routes, Router::new())?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {})
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod hal;
pub mod http;
pub mod server;

pub use auth::{
    AuthUser, JwtAuth, JwtClaims, JwtConfig, TokenPair, TokenType, optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrorItem, ValidationFailure};

pub use hal::{API_ROOT, HAL_JSON, HalJson, Link, Links, PageMetadata, page_links};

pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};

pub use audit::{AuditEvent, AuditOutcome};
