//! Material CRUD and structural move operations.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;
use lectern_database::repositories::material::MaterialRepository;
use lectern_database::repositories::page::PageRepository;
use lectern_entity::material::{CreateMaterial, Material, MaterialKind, MaterialNode};
use lectern_entity::page::Page;
use lectern_storage::keys::material_prefix;
use lectern_storage::object_store::ObjectStore;

use crate::context::RequestContext;

use super::tree::build_tree;

/// Longest allowed display name, in characters.
const MAX_DISPLAY_NAME_CHARS: usize = 100;

/// Request to create a new material node.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateMaterialRequest {
    /// Display name, 1 to 100 characters after trimming.
    pub display_name: String,
    /// Node kind.
    pub kind: MaterialKind,
    /// Parent node ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

/// Field changes for an existing material node.
///
/// `parent_id` is tri-state: `None` leaves the parent untouched,
/// `Some(None)` moves the node to root, `Some(Some(id))` moves it under
/// a category.
#[derive(Debug, Clone, Default)]
pub struct UpdateMaterialFields {
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_favorite: Option<bool>,
    pub parent_id: Option<Option<Uuid>>,
}

/// A book node together with its converted pages.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BookDetail {
    pub material: Material,
    pub pages: Vec<Page>,
}

/// Manages the material hierarchy.
#[derive(Debug, Clone)]
pub struct MaterialService {
    pool: PgPool,
    materials: Arc<MaterialRepository>,
    pages: Arc<PageRepository>,
    store: Arc<ObjectStore>,
}

impl MaterialService {
    /// Creates a new material service.
    pub fn new(
        pool: PgPool,
        materials: Arc<MaterialRepository>,
        pages: Arc<PageRepository>,
        store: Arc<ObjectStore>,
    ) -> Self {
        Self {
            pool,
            materials,
            pages,
            store,
        }
    }

    /// Returns the full material forest in display order.
    ///
    /// With `active_only`, deactivated nodes are filtered out before the
    /// tree is built, so active children of an inactive category surface
    /// as roots.
    pub async fn get_tree(&self, active_only: bool) -> AppResult<Vec<MaterialNode>> {
        let materials = self.materials.list_ordered(active_only).await?;
        Ok(build_tree(&materials))
    }

    /// Gets a material by ID.
    pub async fn get_material(&self, id: Uuid) -> AppResult<Material> {
        self.materials
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Material not found"))
    }

    /// Gets a book node together with its pages in page order.
    pub async fn get_book_detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let material = self.get_material(id).await?;
        if material.kind != MaterialKind::Book {
            return Err(AppError::validation("Material is not a book"));
        }
        let pages = self.pages.list_by_material(material.id).await?;
        Ok(BookDetail { material, pages })
    }

    /// Creates a new node under an optional parent.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateMaterialRequest,
    ) -> AppResult<Material> {
        let display_name = validate_display_name(&req.display_name)?;

        let parent = match req.parent_id {
            Some(parent_id) => Some(
                self.materials
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent material not found"))?,
            ),
            None => None,
        };
        let level = child_level(parent.as_ref());

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let material = self
            .materials
            .insert(
                &mut tx,
                &CreateMaterial {
                    display_name,
                    parent_id: req.parent_id,
                    level,
                    kind: req.kind,
                    uploaded_by: Some(ctx.user_id),
                },
            )
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            user_id = %ctx.user_id,
            material_id = %material.id,
            kind = ?material.kind,
            level = material.level,
            "Material created"
        );

        Ok(material)
    }

    /// Applies field changes and, when the parent changes, performs a
    /// structural move.
    ///
    /// A move recomputes the node's level from the new parent, appends it
    /// to the new sibling list, and shifts every descendant's level by the
    /// same offset so the depth invariant holds for the whole subtree.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: UpdateMaterialFields,
    ) -> AppResult<Material> {
        let mut material = self.get_material(id).await?;

        if let Some(name) = &fields.display_name {
            material.display_name = validate_display_name(name)?;
        }
        if let Some(is_active) = fields.is_active {
            material.is_active = is_active;
        }
        if let Some(is_favorite) = fields.is_favorite {
            material.is_favorite = is_favorite;
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut level_delta = 0;
        if let Some(new_parent) = fields.parent_id {
            if new_parent != material.parent_id {
                let target = match new_parent {
                    Some(target_id) => Some(
                        self.materials
                            .find_by_id(target_id)
                            .await?
                            .ok_or_else(|| AppError::not_found("Target material not found"))?,
                    ),
                    None => None,
                };
                let descendants = self.materials.find_descendants(&mut tx, id).await?;
                let plan = plan_move(&material, target.as_ref(), &descendants)?;

                material.parent_id = new_parent;
                material.level = plan.new_level;
                material.sort_order =
                    Some(self.materials.next_sort_order(&mut tx, new_parent).await?);
                level_delta = plan.level_delta;
            }
        }

        let material = self.materials.update(&mut tx, &material).await?;
        if level_delta != 0 {
            let shifted = self
                .materials
                .shift_descendant_levels(&mut tx, id, level_delta)
                .await?;
            info!(
                material_id = %id,
                delta = level_delta,
                descendants = shifted,
                "Shifted descendant levels after move"
            );
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            user_id = %ctx.user_id,
            material_id = %id,
            "Material updated"
        );

        Ok(material)
    }

    /// Hard-deletes a node and its entire subtree.
    ///
    /// Database rows for the node, its descendants, and (via cascade)
    /// their pages and audio are removed in one transaction. Object
    /// storage folders for book nodes are then deleted best-effort; a
    /// failed storage delete is logged but does not undo the committed
    /// database change.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let material = self.get_material(id).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let descendants = self.materials.find_descendants(&mut tx, id).await?;

        let mut ids: Vec<Uuid> = descendants.iter().map(|d| d.id).collect();
        ids.push(material.id);
        let deleted = self.materials.delete_by_ids(&mut tx, &ids).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        let book_keys = book_storage_keys(descendants.iter().chain(std::iter::once(&material)));

        let prefixes: Vec<String> = book_keys.iter().map(|key| material_prefix(*key)).collect();
        let deletions = prefixes.iter().map(|prefix| self.store.delete_prefix(prefix));
        for (key, result) in book_keys.iter().zip(futures::future::join_all(deletions).await) {
            if let Err(e) = result {
                warn!(storage_key = %key, error = %e, "Storage folder delete failed after commit");
            }
        }

        info!(
            user_id = %ctx.user_id,
            material_id = %id,
            deleted_rows = deleted,
            storage_folders = book_keys.len(),
            "Material subtree deleted"
        );

        Ok(())
    }
}

/// Level a node gets when created or moved under the given parent.
fn child_level(parent: Option<&Material>) -> i32 {
    parent.map(|p| p.level + 1).unwrap_or(0)
}

/// Outcome of validating a structural move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MovePlan {
    /// Level the moved node takes at its new position.
    new_level: i32,
    /// Offset to add to every descendant's level.
    level_delta: i32,
}

/// Validates a move of `material` under `target` (None for root) and
/// computes the resulting levels.
///
/// Rejects moves into the node itself, into a non-category, and into
/// the node's own subtree. `descendants` must be the node's full
/// subtree, exclusive of the node.
fn plan_move(
    material: &Material,
    target: Option<&Material>,
    descendants: &[Material],
) -> AppResult<MovePlan> {
    let new_level = match target {
        None => 0,
        Some(target) => {
            if target.id == material.id {
                return Err(AppError::validation("Cannot move a material into itself"));
            }
            if target.kind != MaterialKind::Category {
                return Err(AppError::validation(
                    "Materials can only be moved under a category",
                ));
            }
            if descendants.iter().any(|d| d.id == target.id) {
                return Err(AppError::validation(
                    "Cannot move a material into one of its descendants",
                ));
            }
            target.level + 1
        }
    };

    Ok(MovePlan {
        new_level,
        level_delta: new_level - material.level,
    })
}

/// Storage keys of the book nodes in `nodes`. Categories own no
/// storage folder, so only books contribute.
fn book_storage_keys<'a, I>(nodes: I) -> Vec<Uuid>
where
    I: IntoIterator<Item = &'a Material>,
{
    nodes
        .into_iter()
        .filter(|m| m.kind == MaterialKind::Book)
        .map(|m| m.storage_key)
        .collect()
}

/// Trims and validates a display name.
fn validate_display_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Display name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(AppError::validation(
            "Display name cannot exceed 100 characters",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lectern_core::error::ErrorKind;

    fn material(kind: MaterialKind, parent_id: Option<Uuid>, level: i32) -> Material {
        let now = Utc::now();
        Material {
            id: Uuid::new_v4(),
            storage_key: Uuid::new_v4(),
            display_name: "Node".to_string(),
            parent_id,
            level,
            sort_order: Some(0),
            kind,
            is_active: true,
            is_favorite: false,
            original_file_name: None,
            total_pages: None,
            uploaded_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn created_nodes_sit_one_level_below_their_parent() {
        let parent = material(MaterialKind::Category, None, 2);
        assert_eq!(child_level(Some(&parent)), 3);
        assert_eq!(child_level(None), 0);
    }

    #[test]
    fn moving_to_root_resets_the_level() {
        let node = material(MaterialKind::Category, Some(Uuid::new_v4()), 3);

        let plan = plan_move(&node, None, &[]).unwrap();

        assert_eq!(plan.new_level, 0);
        assert_eq!(plan.level_delta, -3);
    }

    #[test]
    fn moving_under_a_category_recomputes_level_and_delta() {
        let node = material(MaterialKind::Book, None, 1);
        let target = material(MaterialKind::Category, None, 4);

        let plan = plan_move(&node, Some(&target), &[]).unwrap();

        assert_eq!(plan.new_level, 5);
        assert_eq!(plan.level_delta, 4);
    }

    #[test]
    fn moving_into_itself_is_rejected() {
        let node = material(MaterialKind::Category, None, 0);

        let err = plan_move(&node, Some(&node), &[]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn moving_under_a_book_is_rejected() {
        let node = material(MaterialKind::Category, None, 0);
        let target = material(MaterialKind::Book, None, 0);

        let err = plan_move(&node, Some(&target), &[]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn moving_into_a_descendant_is_rejected() {
        let node = material(MaterialKind::Category, None, 0);
        let child = material(MaterialKind::Category, Some(node.id), 1);

        let err = plan_move(&node, Some(&child), std::slice::from_ref(&child)).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn only_books_contribute_storage_folders() {
        let category = material(MaterialKind::Category, None, 0);
        let book_a = material(MaterialKind::Book, Some(category.id), 1);
        let book_b = material(MaterialKind::Book, Some(category.id), 1);

        let keys = book_storage_keys([&category, &book_a, &book_b]);

        assert_eq!(keys, vec![book_a.storage_key, book_b.storage_key]);
    }

    #[test]
    fn display_name_is_trimmed() {
        assert_eq!(validate_display_name("  Algebra I  ").unwrap(), "Algebra I");
    }

    #[test]
    fn blank_display_name_is_rejected() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
    }

    #[test]
    fn display_name_length_limit_counts_characters() {
        let exactly_100: String = "가".repeat(100);
        assert!(validate_display_name(&exactly_100).is_ok());

        let too_long: String = "가".repeat(101);
        assert!(validate_display_name(&too_long).is_err());
    }
}
