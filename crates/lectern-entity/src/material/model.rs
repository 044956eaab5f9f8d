//! Material entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a material node is a folder or a content unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "material_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// A folder that may contain other nodes.
    Category,
    /// A content unit holding converted pages.
    Book,
}

/// A node in the material hierarchy: a category (folder) or a book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Material {
    /// Unique material identifier.
    pub id: Uuid,
    /// Opaque key naming this node's object-store folder. Immutable.
    pub storage_key: Uuid,
    /// Display name shown to users (1–100 characters).
    pub display_name: String,
    /// Parent node ID (null for root nodes).
    pub parent_id: Option<Uuid>,
    /// Depth in the tree (0 for root, parent.level + 1 otherwise).
    pub level: i32,
    /// Ordering among siblings; null sorts as 0.
    pub sort_order: Option<i32>,
    /// Category or book.
    pub kind: MaterialKind,
    /// Original uploaded PDF file name (books only).
    pub original_file_name: Option<String>,
    /// Total page count, set once conversion completes (books only).
    pub total_pages: Option<i32>,
    /// Admin who uploaded the content, if known.
    pub uploaded_by: Option<Uuid>,
    /// Soft-disable flag; inactive nodes are hidden from user-facing trees.
    pub is_active: bool,
    /// Legacy global favorite flag, superseded by per-user favorites.
    pub is_favorite: bool,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Check if this is a root node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this node can contain children.
    pub fn is_category(&self) -> bool {
        self.kind == MaterialKind::Category
    }
}

/// Data required to create a new material node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterial {
    /// Display name.
    pub display_name: String,
    /// Parent node (None for root).
    pub parent_id: Option<Uuid>,
    /// Depth in the tree.
    pub level: i32,
    /// Category or book.
    pub kind: MaterialKind,
    /// Admin creating the node, if known.
    pub uploaded_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: MaterialKind, parent_id: Option<Uuid>) -> Material {
        Material {
            id: Uuid::new_v4(),
            storage_key: Uuid::new_v4(),
            display_name: "Algebra".into(),
            parent_id,
            level: if parent_id.is_some() { 1 } else { 0 },
            sort_order: None,
            kind,
            original_file_name: None,
            total_pages: None,
            uploaded_by: None,
            is_active: true,
            is_favorite: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn root_detection() {
        assert!(sample(MaterialKind::Category, None).is_root());
        assert!(!sample(MaterialKind::Book, Some(Uuid::new_v4())).is_root());
    }

    #[test]
    fn only_categories_contain_children() {
        assert!(sample(MaterialKind::Category, None).is_category());
        assert!(!sample(MaterialKind::Book, None).is_category());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MaterialKind::Category).unwrap(),
            "\"category\""
        );
        assert_eq!(
            serde_json::to_string(&MaterialKind::Book).unwrap(),
            "\"book\""
        );
    }
}
