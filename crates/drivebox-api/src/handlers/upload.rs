//! Upload authorization and the blob store's completion callback.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::file::File;
use drivebox_service::file::upload::UploadCompleted;

use crate::dto::request::{UploadAuthorizeRequest, UploadCallbackRequest};
use crate::dto::response::{ApiResponse, UploadGrantResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/uploads/authorize — verify the caller may upload into the
/// folder before the client hands bytes to the blob store.
pub async fn authorize(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UploadAuthorizeRequest>,
) -> Result<Json<ApiResponse<UploadGrantResponse>>, ApiError> {
    let folder = state
        .upload_service
        .authorize_upload(&auth, req.folder_id)
        .await?;

    Ok(Json(ApiResponse::ok(UploadGrantResponse {
        folder_id: folder.id,
        max_upload_size_bytes: state.config.blob.max_upload_size_bytes,
    })))
}

/// POST /api/uploads/callback — invoked by the blob store after a
/// successful upload. Authenticated by the configured shared secret, not
/// by a user session.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UploadCallbackRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let expected = &state.config.blob.callback_token;
    if expected.is_empty() {
        return Err(AppError::unauthorized("Upload callbacks are not configured").into());
    }

    let presented = headers
        .get("x-callback-token")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing callback token"))?;
    if presented != expected {
        return Err(AppError::unauthorized("Invalid callback token").into());
    }

    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file = state
        .upload_service
        .complete_upload(UploadCompleted {
            name: req.name,
            size_bytes: req.size_bytes,
            url: req.url,
            parent_id: req.parent_id,
            owner_id: req.owner_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}
