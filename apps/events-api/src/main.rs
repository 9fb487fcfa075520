use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use domain_accounts::{AccountService, PgAccountRepository};
use events_api::{api, config::Config, state::AppState};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(config.database_retry.clone()),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    postgres::run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    AccountService::new(PgAccountRepository::new(db.clone()))
        .bootstrap(&config.properties)
        .await
        .map_err(|e| eyre::eyre!("Account bootstrap failed: {}", e))?;

    let jwt = axum_helpers::JwtAuth::new(&config.jwt);

    let state = AppState { config, db, jwt };
    let app = api::routes(&state)?;

    info!("Starting events API with production-ready shutdown (30s timeout)");

    create_server(app, state).await?;

    info!("Events API shutdown complete");
    Ok(())
}

async fn create_server(app: axum::Router, state: AppState) -> eyre::Result<()> {
    let server = state.config.server.clone();

    axum_helpers::create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))
}
