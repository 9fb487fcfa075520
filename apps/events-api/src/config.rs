use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::{RetryConfig, postgres::PostgresConfig};
use domain_accounts::AppProperties;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Startup connection backoff
    pub database_retry: RetryConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// OAuth client and bootstrap accounts
    pub properties: AppProperties,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - DATABASE_URL
        let database_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - JWT_SECRET
        let properties = AppProperties::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            database_retry,
            server,
            jwt,
            properties,
            environment,
        })
    }
}
