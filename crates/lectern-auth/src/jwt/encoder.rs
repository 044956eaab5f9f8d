//! Access token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::debug;
use uuid::Uuid;

use lectern_core::config::auth::AuthConfig;
use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_entity::user::User;

use super::claims::Claims;

/// Issues signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    token_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Build an encoder from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: Duration::hours(config.token_ttl_hours as i64),
        }
    }

    /// Issue an access token for a user, returning the token string and
    /// its expiry timestamp.
    pub fn generate_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            academy_id: user.academy_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign access token", e)
        })?;

        debug!(user_id = %user.id, %expires_at, "Issued access token");
        Ok((token, expires_at))
    }

    /// Issue a token directly from claim fields, used in tests and tooling.
    pub fn generate_token_for(
        &self,
        user_id: Uuid,
        username: &str,
        role: lectern_entity::user::UserRole,
        academy_id: Option<Uuid>,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role,
            academy_id,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to sign access token", e)
        })
    }
}
