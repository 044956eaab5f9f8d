//! Favorite handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/favorites
///
/// The user's favorites forest, each favorite rebased to a root.
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let forest = state.favorite_service.subtree_snapshot(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": forest })))
}

/// POST /api/favorites/{material_id}
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.favorite_service.add(&auth, material_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/favorites/{material_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(material_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.favorite_service.remove(&auth, material_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
