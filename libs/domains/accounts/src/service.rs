use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppProperties;
use crate::error::{AccountError, AccountResult};
use crate::models::{Account, AccountRole};
use crate::repository::AccountRepository;

/// Service layer for Account business logic
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> Clone for AccountService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Creates an account with a freshly hashed password.
    #[tracing::instrument(skip(self, password))]
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        roles: Vec<AccountRole>,
    ) -> AccountResult<Account> {
        let password_hash = hash_password(password)?;
        let account = Account::new(normalize_email(email), password_hash, roles);
        self.repository.create(account).await
    }

    pub async fn get_account(&self, id: Uuid) -> AccountResult<Account> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Checks a username/password pair.
    ///
    /// Unknown user and wrong password are both `InvalidCredentials`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AccountResult<Account> {
        let account = self
            .repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Returns the account for `email`, creating it when it does not exist yet.
    pub async fn ensure_account(
        &self,
        email: &str,
        password: &str,
        roles: Vec<AccountRole>,
    ) -> AccountResult<Account> {
        if let Some(existing) = self.repository.find_by_email(&normalize_email(email)).await? {
            return Ok(existing);
        }

        match self.create_account(email, password, roles).await {
            // Lost a race with another instance
            Err(AccountError::DuplicateEmail(_)) => self
                .repository
                .find_by_email(&normalize_email(email))
                .await?
                .ok_or_else(|| AccountError::Internal(format!("Account {} vanished", email))),
            other => other,
        }
    }

    /// Creates the configured admin and user accounts on startup.
    pub async fn bootstrap(&self, properties: &AppProperties) -> AccountResult<()> {
        let admin = self
            .ensure_account(
                &properties.admin_username,
                &properties.admin_password,
                vec![AccountRole::Admin, AccountRole::User],
            )
            .await?;
        let user = self
            .ensure_account(
                &properties.user_username,
                &properties.user_password,
                vec![AccountRole::User],
            )
            .await?;

        tracing::info!(admin = %admin.email, user = %user.email, "Bootstrap accounts ready");
        Ok(())
    }
}

fn hash_password(password: &str) -> AccountResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> AccountResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
