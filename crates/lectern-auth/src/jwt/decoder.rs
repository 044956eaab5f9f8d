//! Access token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind as JwtErrorKind};
use tracing::debug;

use lectern_core::config::auth::AuthConfig;
use lectern_core::error::AppError;
use lectern_core::result::AppResult;

use super::claims::Claims;

/// Verifies HS256 access tokens and extracts their claims.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Build a decoder from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let message = match e.kind() {
                JwtErrorKind::ExpiredSignature => "Token has expired",
                JwtErrorKind::InvalidSignature => "Invalid token signature",
                _ => "Invalid token",
            };
            debug!(error = %e, "Token verification failed");
            AppError::authentication(message)
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use lectern_entity::user::UserRole;
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
            password_min_length: 6,
        }
    }

    #[test]
    fn roundtrip_preserves_claims() {
        let cfg = config("test-secret-test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let user_id = Uuid::new_v4();
        let academy_id = Some(Uuid::new_v4());
        let token = encoder
            .generate_token_for(user_id, "teacher1", UserRole::Instructor, academy_id)
            .unwrap();

        let claims = decoder.decode(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "teacher1");
        assert_eq!(claims.role, UserRole::Instructor);
        assert_eq!(claims.academy_id, academy_id);
        assert!(!claims.is_expired());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let encoder = JwtEncoder::new(&config("secret-one-secret-one"));
        let decoder = JwtDecoder::new(&config("secret-two-secret-two"));

        let token = encoder
            .generate_token_for(Uuid::new_v4(), "admin", UserRole::SystemAdmin, None)
            .unwrap();

        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let decoder = JwtDecoder::new(&config("test-secret-test-secret"));
        assert!(decoder.decode("not.a.token").is_err());
    }
}
