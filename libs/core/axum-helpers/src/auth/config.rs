use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Default lifetime of an access token (10 minutes).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 600;
/// Default lifetime of a refresh token (1 hour).
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 3600;

const MIN_SECRET_LEN: usize = 32;

/// Token signing configuration.
///
/// Environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ACCESS_TOKEN_TTL_SECS` (default 600)
/// - `JWT_REFRESH_TOKEN_TTL_SECS` (default 3600)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl JwtConfig {
    /// Config with default lifetimes; fails when the secret is too short.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        })
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

fn positive(key: &str, value: i64) -> Result<i64, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("must be positive (got {})", value),
        });
    }
    Ok(value)
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;

        let access_token_ttl_secs = positive(
            "JWT_ACCESS_TOKEN_TTL_SECS",
            env_parse_or("JWT_ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?,
        )?;
        let refresh_token_ttl_secs = positive(
            "JWT_REFRESH_TOKEN_TTL_SECS",
            env_parse_or("JWT_REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?,
        )?;

        Ok(Self {
            secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
        })
    }
}
