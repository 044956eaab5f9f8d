//! Audio attachment handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use lectern_service::ingest::audio::AttachAudioRequest;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/pages/{id}/audios
pub async fn list_audios(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(page_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let audios = state.audio_service.list(page_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": audios })))
}

/// POST /api/admin/pages/{id}/audios
pub async fn attach_audio(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(page_id): Path<Uuid>,
    Json(req): Json<AttachAudioRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let result = state.audio_service.attach(&auth, page_id, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// DELETE /api/admin/audios/{id}
pub async fn delete_audio(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    state.audio_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
