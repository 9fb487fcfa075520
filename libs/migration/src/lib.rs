//! Schema for the events service: accounts (with their role set) and events.
//!
//! Applied at startup by `events-api` and by `test_utils::TestDatabase`; the
//! `migration` binary exposes the usual `up`/`down`/`status` commands.

pub use sea_orm_migration::prelude::*;

mod m20250101_000000_create_accounts;
mod m20250101_000001_create_events;

/// Ordered so events can reference their manager account.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000000_create_accounts::Migration),
            Box::new(m20250101_000001_create_events::Migration),
        ]
    }
}
