//! Affiliated academy entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An affiliated academy (franchise campus).
///
/// Academies are soft-deleted: `is_existed = false` hides the row from every
/// query while keeping it in storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Academy {
    /// Unique academy identifier.
    pub id: Uuid,
    /// Campus name (2–100 characters).
    pub campus_name: String,
    /// Region label, e.g. a city district (2–255 characters).
    pub region: String,
    /// Contact phone number in `010-XXXX-XXXX` form (optional).
    pub contact_number: Option<String>,
    /// Whether the academy is operational.
    pub is_active: bool,
    /// Soft-delete flag; false means the academy is deleted.
    pub is_existed: bool,
    /// When the academy was registered.
    pub created_at: DateTime<Utc>,
    /// When the academy was last updated.
    pub updated_at: DateTime<Utc>,
}
