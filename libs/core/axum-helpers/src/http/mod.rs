//! Response hardening layered by [`create_router`](crate::server::create_router):
//! security headers on every response, CORS only when origins are configured.

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;
