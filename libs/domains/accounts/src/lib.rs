//! Accounts Domain
//!
//! Accounts that can sign in through the OAuth2 password grant and manage
//! events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   OAuth     │  ← POST /oauth/token (password + refresh_token grants)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argon2 hashing, credential checks, bootstrap accounts
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Account, AccountRole
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_accounts::{AccountService, AppProperties, InMemoryAccountRepository, oauth};
//!
//! let service = AccountService::new(InMemoryAccountRepository::new());
//! let properties = AppProperties::from_env()?;
//! service.bootstrap(&properties).await?;
//!
//! let router = oauth::router(service, jwt_auth, properties.client());
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod models;
pub mod oauth;
pub mod postgres;
pub mod repository;
pub mod service;

pub use config::{AppProperties, ClientCredentials};
pub use error::{AccountError, AccountResult};
pub use models::{Account, AccountRole};
pub use postgres::PgAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
