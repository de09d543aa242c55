//! Upload authorization and completion.
//!
//! Clients upload bytes straight to the blob store; the store calls back
//! once the bytes are durable. Parent-folder ownership is checked when
//! the upload is authorized, not when the callback lands.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::BlobStore;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::folder::Folder;

use crate::context::RequestContext;

/// Handles upload authorization, the completion callback, and the
/// server-proxied upload path.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Folder repository (parent checks).
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob delegate (direct uploads).
    blob: Arc<dyn BlobStore>,
}

/// Payload of the blob store's upload-completion callback.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadCompleted {
    /// File name as uploaded.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Public URL of the stored blob.
    pub url: String,
    /// Destination folder.
    pub parent_id: Uuid,
    /// The uploader, as authorized before the upload started.
    pub owner_id: String,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        blob: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            blob,
        }
    }

    /// Verify that the caller may upload into `folder_id`.
    ///
    /// Runs before the upload is handed to the blob store, per the
    /// authorize-then-callback flow.
    pub async fn authorize_upload(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if folder.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Folder belongs to another user"));
        }
        Ok(folder)
    }

    /// Record a completed upload, appending the file at the end of
    /// sibling order.
    pub async fn complete_upload(&self, completed: UploadCompleted) -> AppResult<File> {
        if completed.size_bytes < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }

        let position = self.file_repo.max_position(completed.parent_id).await? + 1;
        let file = self
            .file_repo
            .insert(&CreateFile {
                owner_id: completed.owner_id,
                name: completed.name,
                size_bytes: completed.size_bytes,
                url: completed.url,
                position,
                parent_id: completed.parent_id,
            })
            .await?;

        info!(
            owner_id = %file.owner_id,
            file_id = %file.id,
            parent_id = %file.parent_id,
            size_bytes = file.size_bytes,
            "Upload recorded"
        );
        Ok(file)
    }

    /// Server-proxied upload: authorize, hand the bytes to the blob
    /// store, then record the file.
    pub async fn upload_direct(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        name: &str,
        data: Bytes,
    ) -> AppResult<File> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        self.authorize_upload(ctx, folder_id).await?;

        let size_bytes = data.len() as i64;
        let blob = self.blob.store(name, data).await?;

        self.complete_upload(UploadCompleted {
            name: name.to_string(),
            size_bytes,
            url: blob.url,
            parent_id: folder_id,
            owner_id: ctx.user_id.clone(),
        })
        .await
    }
}
