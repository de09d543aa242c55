//! File handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use uuid::Uuid;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::file::File;

use crate::dto::request::RenameRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/files/{id} — rename, preserving the extension.
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file = state.file_service.rename_file(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id} — delete blob, then record.
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "File deleted" }),
    )))
}

/// POST /api/folders/{id}/upload — server-proxied multipart upload.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Multipart file field needs a filename"))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        let file = state
            .upload_service
            .upload_direct(&auth, id, &name, data)
            .await?;
        return Ok(Json(ApiResponse::ok(file)));
    }

    Err(AppError::validation("Multipart field 'file' is required").into())
}
