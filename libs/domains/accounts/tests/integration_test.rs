//! Integration tests for the Postgres account repository
//!
//! Each test starts its own Postgres container through `TestDatabase`.

use domain_accounts::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
async fn test_create_and_find_account() {
    let db = TestDatabase::new().await;
    let service = AccountService::new(PgAccountRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_create_account");

    let email = builder.email("manager");
    let created = service
        .create_account(&email, "secret", vec![AccountRole::Admin, AccountRole::User])
        .await
        .unwrap();

    let fetched = service.get_account(created.id).await.unwrap();
    assert_eq!(fetched.email, email);
    assert_eq!(fetched.roles, vec![AccountRole::Admin, AccountRole::User]);

    let verified = service
        .verify_credentials(&email.to_uppercase(), "secret")
        .await
        .unwrap();
    assert_eq!(verified.id, created.id);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let db = TestDatabase::new().await;
    let service = AccountService::new(PgAccountRepository::new(db.connection()));
    let email = TestDataBuilder::from_test_name("pg_duplicate").email("user");

    service.create_account(&email, "one", vec![]).await.unwrap();
    let result = service.create_account(&email, "two", vec![]).await;

    assert!(matches!(result, Err(AccountError::DuplicateEmail(_))));
}

#[tokio::test]
async fn test_bootstrap_against_postgres() {
    let db = TestDatabase::new().await;
    let service = AccountService::new(PgAccountRepository::new(db.connection()));
    let properties = AppProperties::default();

    service.bootstrap(&properties).await.unwrap();
    service.bootstrap(&properties).await.unwrap();

    let admin = service
        .verify_credentials(&properties.admin_username, &properties.admin_password)
        .await
        .unwrap();
    assert!(admin.has_role(AccountRole::Admin));
}
