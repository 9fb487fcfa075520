use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes access tokens from refresh tokens signed with the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,        // Subject (account ID)
    pub username: String,   // Login name
    pub roles: Vec<String>, // e.g. ["ADMIN", "USER"]
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Subject parsed as a UUID, when it is one.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Stateless HS256 token issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            access_ttl = config.access_token_ttl_secs,
            refresh_ttl = config.refresh_token_ttl_secs,
            "JWT auth initialized"
        );
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: config.access_token_ttl_secs,
            refresh_ttl: config.refresh_token_ttl_secs,
        }
    }

    pub fn access_token_ttl(&self) -> i64 {
        self.access_ttl
    }

    /// Issues an access token and a refresh token for the same subject.
    pub fn issue_token_pair(
        &self,
        subject: &str,
        username: &str,
        roles: &[String],
    ) -> eyre::Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_token(
                subject,
                username,
                roles,
                TokenType::Access,
                self.access_ttl,
            )?,
            refresh_token: self.create_token(
                subject,
                username,
                roles,
                TokenType::Refresh,
                self.refresh_ttl,
            )?,
            expires_in: self.access_ttl,
        })
    }

    fn create_token(
        &self,
        subject: &str,
        username: &str,
        roles: &[String],
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            username: username.to_string(),
            roles: roles.to_vec(),
            token_type,
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verifies signature and expiry; the token type is not checked.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }

    pub fn verify_access_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        self.verify_typed(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        self.verify_typed(token, TokenType::Refresh)
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> eyre::Result<JwtClaims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            eyre::bail!("expected {:?} token, got {:?}", expected, claims.token_type);
        }
        Ok(claims)
    }
}
