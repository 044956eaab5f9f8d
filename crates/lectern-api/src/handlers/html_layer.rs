//! Per-page HTML overlay handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::HtmlLayerRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/pages/{id}/html-layer
pub async fn get_html_layer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(page_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let layer = state.html_layer_service.fetch(page_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": layer })))
}

/// PUT /api/admin/pages/{id}/html-layer
pub async fn put_html_layer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(page_id): Path<Uuid>,
    Json(req): Json<HtmlLayerRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    state
        .html_layer_service
        .upload(&auth, page_id, &req.html_content)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
