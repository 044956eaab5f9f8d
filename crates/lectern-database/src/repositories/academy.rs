//! Academy repository. Academies are soft-deleted: every query filters on
//! `is_existed = TRUE`.

use sqlx::PgPool;
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_entity::academy::Academy;

/// Repository for affiliated academies.
#[derive(Debug, Clone)]
pub struct AcademyRepository {
    pool: PgPool,
}

impl AcademyRepository {
    /// Create a new academy repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an existing academy by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Academy>> {
        sqlx::query_as::<_, Academy>(
            "SELECT * FROM academies WHERE id = $1 AND is_existed = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find academy", e))
    }

    /// All existing academies, newest first.
    pub async fn list(&self) -> AppResult<Vec<Academy>> {
        sqlx::query_as::<_, Academy>(
            "SELECT * FROM academies WHERE is_existed = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list academies", e))
    }

    /// Register a new academy.
    pub async fn insert(
        &self,
        campus_name: &str,
        region: &str,
        contact_number: Option<&str>,
    ) -> AppResult<Academy> {
        sqlx::query_as::<_, Academy>(
            "INSERT INTO academies (campus_name, region, contact_number) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(campus_name)
        .bind(region)
        .bind(contact_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create academy", e))
    }

    /// Persist mutable fields of an academy.
    pub async fn update(&self, academy: &Academy) -> AppResult<Academy> {
        sqlx::query_as::<_, Academy>(
            "UPDATE academies SET campus_name = $2, region = $3, contact_number = $4, \
             is_active = $5, updated_at = NOW() \
             WHERE id = $1 AND is_existed = TRUE RETURNING *",
        )
        .bind(academy.id)
        .bind(&academy.campus_name)
        .bind(&academy.region)
        .bind(&academy.contact_number)
        .bind(academy.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update academy", e))?
        .ok_or_else(|| AppError::not_found(format!("Academy {} not found", academy.id)))
    }

    /// Soft-delete an academy.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE academies SET is_existed = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_existed = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete academy", e))?;
        Ok(result.rows_affected() > 0)
    }
}
