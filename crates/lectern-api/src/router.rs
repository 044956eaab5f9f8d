//! Route definitions for the Lectern HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(library_routes())
        .merge(favorite_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, logout, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Reader-facing material, page, and audio endpoints.
fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/materials", get(handlers::library::get_tree))
        .route("/materials/{id}", get(handlers::library::get_book_detail))
        .route("/pages/{id}/audios", get(handlers::audio::list_audios))
        .route(
            "/pages/{id}/html-layer",
            get(handlers::html_layer::get_html_layer),
        )
}

/// Favorite endpoints.
fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(handlers::favorite::list_favorites))
        .route("/favorites/{id}", post(handlers::favorite::add_favorite))
        .route(
            "/favorites/{id}",
            delete(handlers::favorite::remove_favorite),
        )
}

/// Admin endpoints: material mutation, ingestion, accounts.
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Material hierarchy
        .route("/admin/materials", get(handlers::material::get_tree))
        .route("/admin/materials", post(handlers::material::create_material))
        .route(
            "/admin/materials/{id}",
            put(handlers::material::update_material),
        )
        .route(
            "/admin/materials/{id}",
            delete(handlers::material::delete_material),
        )
        // PDF ingestion
        .route(
            "/admin/materials/{id}/pdf",
            post(handlers::upload::presign_pdf),
        )
        .route(
            "/admin/uploads/pdf/complete",
            post(handlers::upload::conversion_complete),
        )
        .route(
            "/admin/uploads/pdf/events/{storage_key}",
            get(handlers::upload::conversion_events),
        )
        // Page attachments
        .route(
            "/admin/pages/{id}/audios",
            post(handlers::audio::attach_audio),
        )
        .route("/admin/audios/{id}", delete(handlers::audio::delete_audio))
        .route(
            "/admin/pages/{id}/html-layer",
            put(handlers::html_layer::put_html_layer),
        )
        // Academies
        .route("/admin/academies", get(handlers::academy::list_academies))
        .route("/admin/academies", post(handlers::academy::create_academy))
        .route("/admin/academies/{id}", get(handlers::academy::get_academy))
        .route(
            "/admin/academies/{id}",
            put(handlers::academy::update_academy),
        )
        .route(
            "/admin/academies/{id}",
            delete(handlers::academy::delete_academy),
        )
        .route(
            "/admin/academies/{id}/users",
            get(handlers::academy::list_academy_users),
        )
        // Users
        .route("/admin/users", post(handlers::user::create_user))
        .route("/admin/users/{id}", get(handlers::user::get_user))
        .route("/admin/users/{id}", put(handlers::user::update_user))
        .route("/admin/users/{id}", delete(handlers::user::delete_user))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration. An empty origin list allows
/// any origin, which suits local development.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors_origins;

    let allow_origin = if origins.is_empty() || origins.contains(&"*".to_string()) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
