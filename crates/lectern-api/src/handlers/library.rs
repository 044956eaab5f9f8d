//! Reader-facing material handlers: active tree and book detail.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/materials
///
/// The active-only forest shown to readers.
pub async fn get_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let tree = state.material_service.get_tree(true).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tree })))
}

/// GET /api/materials/{id}
///
/// A book with its converted pages.
pub async fn get_book_detail(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = state.material_service.get_book_detail(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}
