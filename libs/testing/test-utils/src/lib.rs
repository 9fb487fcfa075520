//! Fixtures for the domain test suites.
//!
//! - [`TestDatabase`] (feature `postgres`): migrated Postgres in a container
//! - [`TestDataBuilder`]: seeded ids, logins and event dates
//! - [`assertions`]: HAL body checks
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let data = TestDataBuilder::from_test_name("pg_create_event");
//! let opens = data.datetime(0);
//! let manager = data.email("manager");
//! # }
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Same seed, same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the test name so parallel tests get distinct data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic account id
    pub fn account_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Unique login name, e.g. `manager-12345@test.local`
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@test.local", local, self.seed)
    }

    /// Fixed point in time shifted by `days`; event schedules in tests are
    /// built from this so they never depend on the wall clock.
    pub fn datetime(&self, days: i64) -> NaiveDateTime {
        let base = NaiveDate::from_ymd_opt(2018, 11, 23)
            .and_then(|d| d.and_hms_opt(14, 21, 0))
            .unwrap_or_default();
        base + Duration::days(days)
    }
}

pub mod assertions {
    /// Asserts that `rel` is present in a HAL `_links` object
    pub fn assert_has_link(body: &str, rel: &str) {
        let needle = format!("\"{}\":{{\"href\":", rel);
        assert!(
            body.contains(&needle),
            "expected link '{}' in response body: {}",
            rel,
            body
        );
    }
}
