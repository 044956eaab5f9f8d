//! Favorite link repository: the user ↔ material join table.

use sqlx::PgPool;
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;

/// Repository for per-user favorite links.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent upsert of a `(user, material)` pair. Re-adding an existing
    /// favorite is a no-op.
    pub async fn upsert(&self, user_id: Uuid, material_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO favorites (user_id, material_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, material_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(material_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add favorite", e))?;
        Ok(())
    }

    /// Idempotent delete; removing a non-existent favorite is a no-op.
    pub async fn remove(&self, user_id: Uuid, material_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND material_id = $2")
            .bind(user_id)
            .bind(material_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove favorite", e)
            })?;
        Ok(())
    }

    /// All material IDs favorited by a user, oldest link first.
    pub async fn list_material_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT material_id FROM favorites WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list favorites", e))
    }
}
