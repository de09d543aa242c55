//! Route definitions for the Drivebox HTTP API.
//!
//! Authenticated routes are organized by domain and mounted under `/api`;
//! the anonymous share path lives at `/s`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.blob.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(drive_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(upload_routes())
        .merge(share_routes())
        .merge(health_routes());

    let public_routes = Router::new()
        .route("/s/{token}", get(handlers::share::resolve_shared))
        .route("/s/{token}/download", get(handlers::share::download_shared));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Drive setup: root lookup and onboarding.
fn drive_routes() -> Router<AppState> {
    Router::new()
        .route("/drive", get(handlers::folder::get_root))
        .route("/drive", post(handlers::folder::onboard))
}

/// Folder CRUD, listings, and reorder.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route(
            "/folders/{id}/contents",
            get(handlers::folder::list_contents),
        )
        .route("/folders/{id}", put(handlers::folder::rename_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/items/reorder", post(handlers::reorder::reorder_items))
}

/// File rename, delete, and direct upload.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}", put(handlers::file::rename_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/folders/{id}/upload", post(handlers::file::upload_file))
}

/// Upload authorization and the blob store callback.
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/authorize", post(handlers::upload::authorize))
        .route("/uploads/callback", post(handlers::upload::callback))
}

/// Share issuance and listing.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/share", post(handlers::share::create_share))
        .route("/files/{id}/share", delete(handlers::share::revoke_share))
        .route("/shares", get(handlers::share::list_shares))
}

/// Liveness.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// CORS layer from configuration; a `*` origin opens everything (dev
/// only), otherwise the configured origins are parsed literally.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;

    if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
