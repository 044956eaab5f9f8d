//! Authentication handlers: login, logout, current user.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let outcome = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": outcome })))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is a client-side discard. The endpoint
/// exists so clients get a uniform success envelope.
pub async fn logout(_auth: AuthUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let current = state.auth_service.current_user(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": current })))
}
