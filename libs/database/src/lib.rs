//! Database connectivity and paging primitives.
//!
//! # Features
//!
//! - `postgres` (default): PostgreSQL through SeaORM, migrations, health checks
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`] and [`common::RetryConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "events-api").await?;
//! ```

pub mod common;
pub mod pagination;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{RetryConfig, retry_if};
pub use pagination::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_INDEX, MAX_PAGE_SIZE, Page, PageRequest, SortDirection, SortOrder,
    SortParseError,
};
