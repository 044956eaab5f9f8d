//! Admin material handlers: full tree and mutation operations.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use lectern_service::material::service::{
    CreateMaterialRequest as SvcCreateMaterial, UpdateMaterialFields,
};

use crate::dto::request::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/materials
///
/// The full forest, including deactivated nodes.
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let tree = state.material_service.get_tree(false).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tree })))
}

/// POST /api/admin/materials
pub async fn create_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMaterialRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let material = state
        .material_service
        .create(
            &auth,
            SvcCreateMaterial {
                display_name: req.display_name,
                kind: req.kind,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": material })))
}

/// PUT /api/admin/materials/{id}
pub async fn update_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMaterialRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let material = state
        .material_service
        .update(
            &auth,
            id,
            UpdateMaterialFields {
                display_name: req.display_name,
                is_active: req.is_active,
                is_favorite: req.is_favorite,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": material })))
}

/// DELETE /api/admin/materials/{id}
pub async fn delete_material(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    state.material_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
