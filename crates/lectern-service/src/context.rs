//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by middleware and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// Affiliated academy, absent for system admins.
    pub academy_id: Option<Uuid>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String, academy_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            username,
            academy_id,
        }
    }

    /// Returns whether the current user holds an admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Rejects the request unless the user holds an admin role.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Administrator privileges are required",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "someone".into(), None)
    }

    #[test]
    fn system_admin_passes_the_admin_check() {
        assert!(ctx(UserRole::SystemAdmin).require_admin().is_ok());
    }

    #[test]
    fn non_admin_roles_are_rejected_by_the_admin_check() {
        assert!(ctx(UserRole::AcademyAdmin).require_admin().is_err());
        assert!(ctx(UserRole::Instructor).require_admin().is_err());
    }
}
