//! User account entity and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User roles, from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform-wide administrator; manages materials, academies, accounts.
    SystemAdmin,
    /// Administrator of a single affiliated academy.
    AcademyAdmin,
    /// Teaching staff of an academy.
    Instructor,
}

impl UserRole {
    /// Whether this role may use the admin API surface.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::SystemAdmin)
    }
}

/// A user account, scoped to an affiliated academy (except system admins).
///
/// Accounts are soft-deleted: `is_existed = false` removes them from every
/// query while keeping the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name, unique across the platform (3–50 characters).
    pub username: String,
    /// Argon2id password hash. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Real name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// Email address (optional).
    pub email: Option<String>,
    /// Phone number (optional).
    pub phone_number: Option<String>,
    /// Affiliated academy (system admins have none).
    pub academy_id: Option<Uuid>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Soft-delete flag; false means the account is deleted.
    pub is_existed: bool,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_system_admin_is_admin() {
        assert!(UserRole::SystemAdmin.is_admin());
        assert!(!UserRole::AcademyAdmin.is_admin());
        assert!(!UserRole::Instructor.is_admin());
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::SystemAdmin).unwrap(),
            "\"system_admin\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::AcademyAdmin).unwrap(),
            "\"academy_admin\""
        );
    }
}
