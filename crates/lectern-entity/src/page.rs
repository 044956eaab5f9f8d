//! Content page entity: one converted page image of a book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single page of a book material, produced by the conversion worker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Page {
    /// Unique page identifier.
    pub id: Uuid,
    /// Opaque key naming this page's object-store location.
    pub page_key: Uuid,
    /// The book this page belongs to.
    pub material_id: Uuid,
    /// 1-based page number, unique within a material.
    pub page_number: i32,
    /// Image file name (e.g. `page-001.webp`).
    pub file_name: String,
    /// Full object-store key of the page image.
    pub object_key: String,
    /// When the page record was created.
    pub created_at: DateTime<Utc>,
    /// When the page record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A page entry reported by the external conversion worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertedPage {
    /// 1-based page number.
    pub page_number: i32,
    /// Image file name.
    pub file_name: String,
    /// Full object-store key of the page image.
    pub object_key: String,
}
