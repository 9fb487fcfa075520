use axum::{Router, middleware, routing::get};
use axum_helpers::{JwtAuth, optional_jwt_auth_middleware, server::create_router};
use domain_accounts::{AccountRepository, AccountService, ClientCredentials, oauth};
use domain_events::{EventRepository, EventService, handlers};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod events;
pub mod health;
pub mod index;

/// Routes mounted under `/api`: the index and the event resources.
pub fn api_routes<R: EventRepository + 'static>(events: EventService<R>) -> Router {
    Router::new()
        .route("/", get(index::index))
        .merge(handlers::router(events))
}

/// Routes outside `/api`: the token endpoint.
pub fn public_routes<R: AccountRepository + 'static>(
    accounts: AccountService<R>,
    jwt: JwtAuth,
    client: ClientCredentials,
) -> Router {
    oauth::router(accounts, jwt, client)
}

/// Full application router: docs, `/api` behind optional bearer auth, and `extra` at the root.
pub fn build_app(apis: Router, extra: Router, jwt: JwtAuth) -> io::Result<Router> {
    let apis = apis.layer(middleware::from_fn_with_state(
        jwt,
        optional_jwt_auth_middleware,
    ));
    create_router::<ApiDoc>(apis, extra)
}

/// Postgres-backed routes for the running server.
pub fn routes(state: &AppState) -> io::Result<Router> {
    let extra = Router::new()
        .merge(auth::router(state))
        .merge(axum_helpers::health_router(state.config.app))
        .merge(ready_router(state.clone()));

    build_app(events::router(state), extra, state.jwt.clone())
}

/// Creates a router with the /ready endpoint that performs actual health checks.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
