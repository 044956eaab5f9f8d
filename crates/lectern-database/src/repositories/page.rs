//! Page repository: converted page images of a book.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_entity::page::{ConvertedPage, Page};

/// Repository for content pages.
#[derive(Debug, Clone)]
pub struct PageRepository {
    pool: PgPool,
}

impl PageRepository {
    /// Create a new page repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a page by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Page>> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find page", e))
    }

    /// All pages of a material, in page-number order.
    pub async fn list_by_material(&self, material_id: Uuid) -> AppResult<Vec<Page>> {
        sqlx::query_as::<_, Page>(
            "SELECT * FROM pages WHERE material_id = $1 ORDER BY page_number ASC",
        )
        .bind(material_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pages", e))
    }

    /// Bulk-insert pages reported by the conversion worker.
    pub async fn bulk_insert(
        &self,
        conn: &mut PgConnection,
        material_id: Uuid,
        pages: &[ConvertedPage],
    ) -> AppResult<u64> {
        let mut inserted = 0;
        for page in pages {
            sqlx::query(
                "INSERT INTO pages (material_id, page_number, file_name, object_key) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(material_id)
            .bind(page.page_number)
            .bind(&page.file_name)
            .bind(&page.object_key)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("pages_material_id_page_number_key") =>
                {
                    AppError::conflict(format!(
                        "Page {} already exists for this material",
                        page.page_number
                    ))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to insert page", e),
            })?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
