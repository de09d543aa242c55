//! Share handlers: owner-side issuance plus the anonymous access path.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_entity::share::Share;

use crate::dto::response::{ApiResponse, ShareLinkResponse, SharedFileResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/share — create (or return the existing) link.
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShareLinkResponse>>, ApiError> {
    let share = state.share_service.create_link(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ShareLinkResponse {
        path: format!("/s/{}", share.token),
        token: share.token,
    })))
}

/// DELETE /api/files/{id}/share — revoke all links for the file.
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.share_service.revoke_link(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Share revoked" }),
    )))
}

/// GET /api/shares — all shares the caller has created.
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Share>>>, ApiError> {
    let shares = state.share_service.list_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// GET /s/{token} — anonymous share metadata. The blob URL stays
/// server-side.
pub async fn resolve_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<SharedFileResponse>>, ApiError> {
    let (_, file) = state.access_service.resolve(&token).await?;
    Ok(Json(ApiResponse::ok(SharedFileResponse {
        name: file.name,
        size_bytes: file.size_bytes,
    })))
}

/// GET /s/{token}/download — stream the shared file's bytes.
pub async fn download_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.access_service.download(&token).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, download.file.size_bytes.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&download.file.name),
        )
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Failed to build download response: {e}")))?;

    Ok(response)
}

/// Build an `attachment` Content-Disposition, quoting the filename so it
/// cannot break out of the header.
fn attachment_disposition(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            _ => vec![c],
        })
        .collect();
    format!("attachment; filename=\"{sanitized}\"")
}
