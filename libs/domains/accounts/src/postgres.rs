use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use crate::{
    entity,
    error::{AccountError, AccountResult},
    models::Account,
    repository::AccountRepository,
};

#[derive(Clone)]
pub struct PgAccountRepository {
    db: DatabaseConnection,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: Account) -> AccountResult<Account> {
        let email = account.email.clone();
        let active_model: entity::ActiveModel = account.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AccountError::DuplicateEmail(email),
                _ => AccountError::Database(e),
            })?;

        tracing::info!(account_id = %model.id, "Created account");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AccountResult<Option<Account>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        // Emails are stored lowercased by the service
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }
}
