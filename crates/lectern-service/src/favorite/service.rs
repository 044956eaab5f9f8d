//! Favorite link management and the favorites forest.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_database::repositories::favorite::FavoriteRepository;
use lectern_database::repositories::material::MaterialRepository;
use lectern_entity::material::MaterialNode;

use crate::context::RequestContext;
use crate::material::build_tree;

/// Manages per-user favorites.
#[derive(Debug, Clone)]
pub struct FavoriteService {
    favorites: Arc<FavoriteRepository>,
    materials: Arc<MaterialRepository>,
}

impl FavoriteService {
    /// Creates a new favorite service.
    pub fn new(favorites: Arc<FavoriteRepository>, materials: Arc<MaterialRepository>) -> Self {
        Self {
            favorites,
            materials,
        }
    }

    /// Marks a material as a favorite for the user. Idempotent.
    pub async fn add(&self, ctx: &RequestContext, material_id: Uuid) -> AppResult<()> {
        let material = self
            .materials
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| AppError::not_found("Material not found"))?;

        if !material.is_active {
            return Err(AppError::validation(
                "Inactive materials cannot be favorited",
            ));
        }

        self.favorites.upsert(ctx.user_id, material_id).await?;
        info!(user_id = %ctx.user_id, material_id = %material_id, "Favorite added");
        Ok(())
    }

    /// Removes a favorite link. Removing a link that does not exist is a
    /// no-op success.
    pub async fn remove(&self, ctx: &RequestContext, material_id: Uuid) -> AppResult<()> {
        self.favorites.remove(ctx.user_id, material_id).await?;
        info!(user_id = %ctx.user_id, material_id = %material_id, "Favorite removed");
        Ok(())
    }

    /// Returns the user's favorites forest.
    ///
    /// Each favorited node becomes a standalone root carrying a deep copy
    /// of its current subtree, rebased so its own level is 0. Favorites
    /// nested inside other favorites appear both as roots and inside the
    /// outer subtree.
    pub async fn subtree_snapshot(&self, ctx: &RequestContext) -> AppResult<Vec<MaterialNode>> {
        let favorite_ids = self.favorites.list_material_ids(ctx.user_id).await?;
        if favorite_ids.is_empty() {
            return Ok(Vec::new());
        }

        let materials = self.materials.list_ordered(true).await?;
        let forest = build_tree(&materials);

        let mut snapshot = Vec::new();
        for material_id in favorite_ids {
            if let Some(node) = find_node(&forest, material_id) {
                snapshot.push(rebase(node));
            }
        }
        Ok(snapshot)
    }
}

/// Depth-first lookup of a node in a forest.
fn find_node(forest: &[MaterialNode], id: Uuid) -> Option<&MaterialNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Deep-copies a subtree with the root moved to level 0 and every
/// descendant shifted by the same offset.
fn rebase(node: &MaterialNode) -> MaterialNode {
    let offset = node.level;
    let mut root = shift(node, offset);
    root.parent_id = None;
    root
}

fn shift(node: &MaterialNode, offset: i32) -> MaterialNode {
    let mut copy = node.clone();
    copy.level = node.level - offset;
    copy.children = node.children.iter().map(|c| shift(c, offset)).collect();
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lectern_entity::material::MaterialKind;

    fn node(id: Uuid, parent_id: Option<Uuid>, level: i32) -> MaterialNode {
        let now = Utc::now();
        MaterialNode {
            id,
            storage_key: Uuid::new_v4(),
            display_name: format!("node-{level}"),
            parent_id,
            level,
            kind: MaterialKind::Category,
            is_active: true,
            is_favorite: false,
            total_pages: None,
            created_at: now,
            updated_at: now,
            children: Vec::new(),
        }
    }

    #[test]
    fn rebase_moves_root_to_level_zero() {
        let grandparent = Uuid::new_v4();
        let mut deep = node(Uuid::new_v4(), Some(grandparent), 3);
        let child_id = Uuid::new_v4();
        let mut child = node(child_id, Some(deep.id), 4);
        let leaf = node(Uuid::new_v4(), Some(child_id), 5);
        child.children.push(leaf);
        deep.children.push(child);

        let rebased = rebase(&deep);

        assert_eq!(rebased.level, 0);
        assert_eq!(rebased.parent_id, None);
        assert_eq!(rebased.children[0].level, 1);
        assert_eq!(rebased.children[0].children[0].level, 2);
        // The copy keeps child parent references intact.
        assert_eq!(rebased.children[0].parent_id, Some(deep.id));
    }

    #[test]
    fn rebase_does_not_mutate_the_source() {
        let source = node(Uuid::new_v4(), Some(Uuid::new_v4()), 2);
        let _ = rebase(&source);
        assert_eq!(source.level, 2);
        assert!(source.parent_id.is_some());
    }

    #[test]
    fn find_node_searches_nested_children() {
        let target_id = Uuid::new_v4();
        let mut root = node(Uuid::new_v4(), None, 0);
        let mut mid = node(Uuid::new_v4(), Some(root.id), 1);
        mid.children.push(node(target_id, Some(mid.id), 2));
        root.children.push(mid);
        let forest = vec![root];

        assert_eq!(find_node(&forest, target_id).map(|n| n.id), Some(target_id));
        assert!(find_node(&forest, Uuid::new_v4()).is_none());
    }
}
