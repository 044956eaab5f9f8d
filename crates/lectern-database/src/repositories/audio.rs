//! Audio repository: narration clips attached to pages.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_entity::audio::{Audio, CreateAudio};

/// Repository for audio attachments.
#[derive(Debug, Clone)]
pub struct AudioRepository {
    pool: PgPool,
}

impl AudioRepository {
    /// Create a new audio repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an audio clip by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Audio>> {
        sqlx::query_as::<_, Audio>("SELECT * FROM audios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find audio", e))
    }

    /// All clips attached to a page, newest upload first.
    pub async fn list_by_page(&self, page_id: Uuid) -> AppResult<Vec<Audio>> {
        sqlx::query_as::<_, Audio>(
            "SELECT * FROM audios WHERE page_id = $1 ORDER BY created_at DESC",
        )
        .bind(page_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audios", e))
    }

    /// Register a new audio clip.
    pub async fn insert(&self, conn: &mut PgConnection, data: &CreateAudio) -> AppResult<Audio> {
        sqlx::query_as::<_, Audio>(
            "INSERT INTO audios (audio_key, page_id, display_name, original_file_name, \
             file_size, mime_type, object_key, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.audio_key)
        .bind(data.page_id)
        .bind(&data.display_name)
        .bind(&data.original_file_name)
        .bind(data.file_size)
        .bind(&data.mime_type)
        .bind(&data.object_key)
        .bind(data.uploaded_by)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audio", e))
    }

    /// Hard-delete an audio clip.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM audios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete audio", e))?;
        Ok(result.rows_affected() > 0)
    }
}
