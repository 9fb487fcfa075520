//! PostgreSQL through SeaORM: pool configuration, connection with retry,
//! migrations and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config_with_retry, is_transient, run_migrations};
pub use health::check_health;

pub use sea_orm::DatabaseConnection;
