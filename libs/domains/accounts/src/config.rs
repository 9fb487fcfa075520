use core_config::{ConfigError, FromEnv, env_or_default};

/// OAuth client and bootstrap account settings.
///
/// Environment variables (defaults in parentheses):
/// - `APP_CLIENT_ID` (myApp), `APP_CLIENT_SECRET` (pass)
/// - `APP_ADMIN_USERNAME` (admin@email.com), `APP_ADMIN_PASSWORD` (admin)
/// - `APP_USER_USERNAME` (user@email.com), `APP_USER_PASSWORD` (user)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppProperties {
    pub client_id: String,
    pub client_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_password: String,
}

/// HTTP Basic credentials the token endpoint accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn matches(&self, client_id: &str, client_secret: &str) -> bool {
        self.client_id == client_id && self.client_secret == client_secret
    }
}

impl AppProperties {
    pub fn client(&self) -> ClientCredentials {
        ClientCredentials::new(&self.client_id, &self.client_secret)
    }
}

impl Default for AppProperties {
    fn default() -> Self {
        Self {
            client_id: "myApp".to_string(),
            client_secret: "pass".to_string(),
            admin_username: "admin@email.com".to_string(),
            admin_password: "admin".to_string(),
            user_username: "user@email.com".to_string(),
            user_password: "user".to_string(),
        }
    }
}

impl FromEnv for AppProperties {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            client_id: env_or_default("APP_CLIENT_ID", &defaults.client_id),
            client_secret: env_or_default("APP_CLIENT_SECRET", &defaults.client_secret),
            admin_username: env_or_default("APP_ADMIN_USERNAME", &defaults.admin_username),
            admin_password: env_or_default("APP_ADMIN_PASSWORD", &defaults.admin_password),
            user_username: env_or_default("APP_USER_USERNAME", &defaults.user_username),
            user_password: env_or_default("APP_USER_PASSWORD", &defaults.user_password),
        })
    }
}
