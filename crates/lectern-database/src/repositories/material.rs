//! Material repository: CRUD and tree queries over the content hierarchy.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_entity::material::model::{CreateMaterial, Material};

/// Upper bound on tree depth for recursive queries. A parent cycle would
/// otherwise loop forever; the store never produces trees this deep.
const MAX_TREE_DEPTH: i32 = 64;

/// Repository for material CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct MaterialRepository {
    pool: PgPool,
}

impl MaterialRepository {
    /// Create a new material repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a material by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Material>> {
        sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find material", e))
    }

    /// Find a material by its object-store key.
    pub async fn find_by_storage_key(&self, storage_key: Uuid) -> AppResult<Option<Material>> {
        sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE storage_key = $1")
            .bind(storage_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find material by storage key",
                    e,
                )
            })
    }

    /// List all materials in tree order: ascending level, then sibling sort
    /// order (null sorts as 0), then creation time as a stable tiebreak.
    pub async fn list_ordered(&self, active_only: bool) -> AppResult<Vec<Material>> {
        let sql = if active_only {
            "SELECT * FROM materials WHERE is_active = TRUE \
             ORDER BY level ASC, COALESCE(sort_order, 0) ASC, created_at ASC"
        } else {
            "SELECT * FROM materials \
             ORDER BY level ASC, COALESCE(sort_order, 0) ASC, created_at ASC"
        };
        sqlx::query_as::<_, Material>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list materials", e))
    }

    /// Recursive query collecting all descendants of a node, exclusive of the
    /// node itself, bounded to [`MAX_TREE_DEPTH`] levels as a cycle guard.
    pub async fn find_descendants(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Vec<Material>> {
        sqlx::query_as::<_, Material>(
            "WITH RECURSIVE tree AS ( \
                SELECT m.*, 1 AS rel_depth FROM materials m WHERE m.parent_id = $1 \
                UNION ALL \
                SELECT m.*, t.rel_depth + 1 FROM materials m \
                    INNER JOIN tree t ON m.parent_id = t.id \
                WHERE t.rel_depth < $2 \
             ) SELECT * FROM tree \
             ORDER BY level ASC, COALESCE(sort_order, 0) ASC, created_at ASC",
        )
        .bind(id)
        .bind(MAX_TREE_DEPTH)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Next sibling sort order under the given parent: max existing order
    /// plus one, treating null as 0. Returns 0 when there are no siblings.
    pub async fn next_sort_order(
        &self,
        conn: &mut PgConnection,
        parent_id: Option<Uuid>,
    ) -> AppResult<i32> {
        let max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(COALESCE(sort_order, 0)) FROM materials \
             WHERE parent_id IS NOT DISTINCT FROM $1",
        )
        .bind(parent_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute sort order", e)
        })?;

        Ok(max.map(|m| m + 1).unwrap_or(0))
    }

    /// Insert a new material node.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateMaterial,
    ) -> AppResult<Material> {
        sqlx::query_as::<_, Material>(
            "INSERT INTO materials (display_name, parent_id, level, kind, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.display_name)
        .bind(data.parent_id)
        .bind(data.level)
        .bind(data.kind)
        .bind(data.uploaded_by)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create material", e))
    }

    /// Persist every mutable field of a material.
    pub async fn update(&self, conn: &mut PgConnection, material: &Material) -> AppResult<Material> {
        sqlx::query_as::<_, Material>(
            "UPDATE materials SET display_name = $2, parent_id = $3, level = $4, \
             sort_order = $5, is_active = $6, is_favorite = $7, \
             original_file_name = $8, total_pages = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(material.id)
        .bind(&material.display_name)
        .bind(material.parent_id)
        .bind(material.level)
        .bind(material.sort_order)
        .bind(material.is_active)
        .bind(material.is_favorite)
        .bind(&material.original_file_name)
        .bind(material.total_pages)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update material", e))?
        .ok_or_else(|| AppError::not_found(format!("Material {} not found", material.id)))
    }

    /// Shift the level of every descendant of a node by `delta`. Used when
    /// a move changes the node's own depth.
    pub async fn shift_descendant_levels(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        delta: i32,
    ) -> AppResult<u64> {
        if delta == 0 {
            return Ok(0);
        }
        let result = sqlx::query(
            "WITH RECURSIVE tree AS ( \
                SELECT m.id, 1 AS rel_depth FROM materials m WHERE m.parent_id = $1 \
                UNION ALL \
                SELECT m.id, t.rel_depth + 1 FROM materials m \
                    INNER JOIN tree t ON m.parent_id = t.id \
                WHERE t.rel_depth < $3 \
             ) \
             UPDATE materials SET level = level + $2, updated_at = NOW() \
             WHERE id IN (SELECT id FROM tree)",
        )
        .bind(id)
        .bind(delta)
        .bind(MAX_TREE_DEPTH)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to shift descendant levels", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Record the result of a completed PDF conversion.
    pub async fn set_conversion_result(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        total_pages: i32,
    ) -> AppResult<()> {
        sqlx::query("UPDATE materials SET total_pages = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(total_pages)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record conversion result", e)
            })?;
        Ok(())
    }

    /// Hard-delete a set of materials by ID.
    pub async fn delete_by_ids(&self, conn: &mut PgConnection, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM materials WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete materials", e)
            })?;
        Ok(result.rows_affected())
    }
}
