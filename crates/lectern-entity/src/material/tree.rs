//! Material tree structures for hierarchical display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Material, MaterialKind};

/// A node in a material tree, carrying its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialNode {
    /// Material ID.
    pub id: Uuid,
    /// Object-store folder key.
    pub storage_key: Uuid,
    /// Display name.
    pub display_name: String,
    /// Parent ID (None for forest roots).
    pub parent_id: Option<Uuid>,
    /// Depth level.
    pub level: i32,
    /// Category or book.
    pub kind: MaterialKind,
    /// Whether the node is active.
    pub is_active: bool,
    /// Legacy global favorite flag.
    pub is_favorite: bool,
    /// Total page count (books only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i32>,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
    /// Child nodes, in sibling sort order.
    pub children: Vec<MaterialNode>,
}

impl MaterialNode {
    /// Build a leaf node (no children yet) from a flat material record.
    pub fn from_material(material: &Material) -> Self {
        Self {
            id: material.id,
            storage_key: material.storage_key,
            display_name: material.display_name.clone(),
            parent_id: material.parent_id,
            level: material.level,
            kind: material.kind,
            is_active: material.is_active,
            is_favorite: material.is_favorite,
            total_pages: material.total_pages,
            created_at: material.created_at,
            updated_at: material.updated_at,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MaterialNode::subtree_size)
            .sum::<usize>()
    }
}
