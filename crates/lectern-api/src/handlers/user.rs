//! User account management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use lectern_service::account::user::{CreateUserRequest, UpdateUserRequest};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = state.user_service.create(&auth, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = state.user_service.update(&auth, id, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.user_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
