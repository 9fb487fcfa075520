use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use std::time::{Duration, Instant};

/// Runs `SELECT 1` and returns how long the round trip took.
pub async fn check_health(db: &DatabaseConnection) -> Result<Duration, DbErr> {
    let start = Instant::now();
    let probe = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1");
    db.query_one_raw(probe).await?;

    let latency = start.elapsed();
    tracing::debug!(latency_ms = latency.as_millis() as u64, "PostgreSQL answered");
    Ok(latency)
}
