use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::Account;

/// Repository trait for Account persistence
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is taken
    async fn create(&self, account: Account) -> AccountResult<Account>;

    async fn find_by_id(&self, id: Uuid) -> AccountResult<Option<Account>>;

    /// Case-insensitive lookup by login name
    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>>;
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> AccountResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AccountError::DuplicateEmail(account.email));
        }

        accounts.insert(account.id, account.clone());

        tracing::info!(account_id = %account.id, email = %account.email, "Created account");
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
