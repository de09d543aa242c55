//! Drive and folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::folder::Folder;
use drivebox_service::folder::service::{
    CreateFolderRequest as SvcCreateFolder, FolderContents,
};

use crate::dto::request::{CreateFolderRequest, RenameRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/drive — the caller's root folder, or null before onboarding.
pub async fn get_root(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Option<Folder>>>, ApiError> {
    let root = state.folder_service.get_root(&auth).await?;
    Ok(Json(ApiResponse::ok(root)))
}

/// POST /api/drive — set up a new drive with the default folders.
pub async fn onboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let root = state.folder_service.onboard_user(&auth).await?;
    Ok(Json(ApiResponse::ok(root)))
}

/// GET /api/folders/{id}/contents — breadcrumbs plus ordered children.
pub async fn list_contents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FolderContents>>, ApiError> {
    let contents = state.folder_service.list_contents(&auth, id).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id} — rename.
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id} — cascading delete.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Folder deleted" }),
    )))
}
