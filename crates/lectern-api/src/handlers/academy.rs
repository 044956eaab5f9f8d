//! Academy management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use lectern_service::account::academy::{CreateAcademyRequest, UpdateAcademyRequest};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/academies
pub async fn list_academies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let academies = state.academy_service.list().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": academies }),
    ))
}

/// GET /api/admin/academies/{id}
pub async fn get_academy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let academy = state.academy_service.get_academy(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": academy })))
}

/// POST /api/admin/academies
pub async fn create_academy(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAcademyRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let academy = state.academy_service.create(&auth, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": academy })))
}

/// PUT /api/admin/academies/{id}
pub async fn update_academy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAcademyRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let academy = state.academy_service.update(&auth, id, req).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": academy })))
}

/// DELETE /api/admin/academies/{id}
pub async fn delete_academy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.academy_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/admin/academies/{id}/users
pub async fn list_academy_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    auth.require_admin()?;
    let users = state.user_service.list_by_academy(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": users })))
}
