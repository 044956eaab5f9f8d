//! User account management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use lectern_auth::PasswordHasher;
use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_database::repositories::academy::AcademyRepository;
use lectern_database::repositories::user::UserRepository;
use lectern_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Request to create a user account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateUserRequest {
    /// Login name, 3 to 50 characters, unique.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Real name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Affiliated academy.
    pub academy_id: Option<Uuid>,
}

/// Field changes for an existing account.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateUserRequest {
    /// New plaintext password, hashed before storage.
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Manages user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    academies: Arc<AcademyRepository>,
    hasher: PasswordHasher,
    password_min_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        academies: Arc<AcademyRepository>,
        hasher: PasswordHasher,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            academies,
            hasher,
            password_min_length,
        }
    }

    /// Gets an existing user by ID.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists an academy's users, newest first.
    pub async fn list_by_academy(&self, academy_id: Uuid) -> AppResult<Vec<User>> {
        self.academies
            .find_by_id(academy_id)
            .await?
            .ok_or_else(|| AppError::not_found("Academy not found"))?;
        self.users.list_by_academy(academy_id).await
    }

    /// Creates a user account. A duplicate username is a conflict.
    pub async fn create(&self, ctx: &RequestContext, req: CreateUserRequest) -> AppResult<User> {
        ctx.require_admin()?;
        self.validate_username(&req.username)?;
        self.validate_password(&req.password)?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if let Some(academy_id) = req.academy_id {
            self.academies
                .find_by_id(academy_id)
                .await?
                .ok_or_else(|| AppError::not_found("Academy not found"))?;
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .insert(&CreateUser {
                username: req.username.trim().to_string(),
                password_hash,
                name: req.name.trim().to_string(),
                role: req.role,
                email: req.email,
                phone_number: req.phone_number,
                academy_id: req.academy_id,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            username = %user.username,
            role = ?user.role,
            "User created"
        );
        Ok(user)
    }

    /// Updates profile fields of an account.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> AppResult<User> {
        ctx.require_admin()?;
        let mut user = self.get_user(id).await?;

        if let Some(password) = &req.password {
            self.validate_password(password)?;
            user.password_hash = self.hasher.hash_password(password)?;
        }
        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
            user.name = name.trim().to_string();
        }
        if let Some(email) = req.email {
            user.email = Some(email);
        }
        if let Some(phone_number) = req.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(is_active) = req.is_active {
            user.is_active = is_active;
        }

        let user = self.users.update(&user).await?;
        info!(admin_id = %ctx.user_id, user_id = %id, "User updated");
        Ok(user)
    }

    /// Soft-deletes an account; the row remains for audit joins.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.users.soft_delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(admin_id = %ctx.user_id, user_id = %id, "User deleted");
        Ok(())
    }

    fn validate_username(&self, username: &str) -> AppResult<()> {
        let chars = username.trim().chars().count();
        if !(3..=50).contains(&chars) {
            return Err(AppError::validation("Username must be 3 to 50 characters"));
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> AppResult<()> {
        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}
