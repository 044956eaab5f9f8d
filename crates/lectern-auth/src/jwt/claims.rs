//! JWT claims structure used in access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lectern_entity::user::UserRole;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Login name for convenience.
    pub username: String,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Affiliated academy, absent for system admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academy_id: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp_offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: Uuid::new_v4(),
            username: "admin".into(),
            role: UserRole::SystemAdmin,
            academy_id: None,
            iat: now,
            exp: now + exp_offset_secs,
        }
    }

    #[test]
    fn expiry_check() {
        assert!(!claims(3600).is_expired());
        assert!(claims(-1).is_expired());
    }

    #[test]
    fn absent_academy_is_omitted_from_json() {
        let json = serde_json::to_value(claims(3600)).unwrap();
        assert!(json.get("academy_id").is_none());
    }
}
