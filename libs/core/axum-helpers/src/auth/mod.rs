//! Bearer token authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 access/refresh tokens
//! - [`optional_jwt_auth_middleware`] puts verified [`JwtClaims`] into request extensions
//! - [`AuthUser`] pulls them back out in handlers, rejecting anonymous requests with 401
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, optional_jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let app = Router::new()
//!     .route("/api/events", post(create_event))
//!     .layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TokenPair, TokenType};
pub use middleware::{bearer_token, optional_jwt_auth_middleware};
pub use user::AuthUser;
