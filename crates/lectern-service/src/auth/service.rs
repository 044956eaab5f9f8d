//! Login flow and authenticated-user lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use lectern_auth::{JwtEncoder, PasswordHasher};
use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_database::repositories::academy::AcademyRepository;
use lectern_database::repositories::user::UserRepository;
use lectern_entity::academy::Academy;
use lectern_entity::user::User;

use crate::context::RequestContext;

/// Successful login result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginOutcome {
    /// Signed access token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
    /// The user's academy, if affiliated.
    pub academy: Option<Academy>,
}

/// The current user plus their academy, for `me`-style lookups.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthenticatedUser {
    pub user: User,
    pub academy: Option<Academy>,
}

/// Handles login and authenticated-user resolution.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    academies: Arc<AcademyRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        academies: Arc<AcademyRepository>,
        hasher: PasswordHasher,
        encoder: JwtEncoder,
    ) -> Self {
        Self {
            users,
            academies,
            hasher,
            encoder,
        }
    }

    /// Authenticates a username/password pair and issues a token.
    ///
    /// Unknown usernames and wrong passwords both surface as the same
    /// authentication error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let user = self
            .users
            .find_active_by_username(username.trim())
            .await?
            .ok_or_else(|| {
                warn!(username = %username.trim(), "Login attempt for unknown or inactive user");
                AppError::authentication("Invalid username or password")
            })?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication("Invalid username or password"));
        }

        self.users.touch_last_login(user.id).await?;
        let (token, expires_at) = self.encoder.generate_token(&user)?;
        let academy = self.load_academy(&user).await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginOutcome {
            token,
            expires_at,
            user,
            academy,
        })
    }

    /// Resolves the user behind an already-verified request context.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<AuthenticatedUser> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        let academy = self.load_academy(&user).await?;
        Ok(AuthenticatedUser { user, academy })
    }

    async fn load_academy(&self, user: &User) -> AppResult<Option<Academy>> {
        match user.academy_id {
            Some(academy_id) => self.academies.find_by_id(academy_id).await,
            None => Ok(None),
        }
    }
}
