//! Shared application state, built once in `main` and handed to the routers.

use axum_helpers::JwtAuth;

/// Cloned into each router; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Token issuer and verifier
    pub jwt: JwtAuth,
}
