//! File operations: rename and delete.
//!
//! Both operations order their steps so the tree store is mutated last —
//! a failed blob-delegate call leaves the record untouched rather than
//! orphaning a reachable record behind a missing or mis-named blob.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::BlobStore;
use drivebox_database::repositories::file::FileRepository;
use drivebox_entity::file::File;

use crate::context::RequestContext;

/// Handles file rename and delete against store and blob delegate.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob delegate.
    blob: Arc<dyn BlobStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<FileRepository>, blob: Arc<dyn BlobStore>) -> Self {
        Self { file_repo, blob }
    }

    /// Fetch a file and verify the caller owns it.
    pub async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.owner_id != ctx.user_id {
            return Err(AppError::forbidden("File belongs to another user"));
        }
        Ok(file)
    }

    /// Renames a file, preserving its extension when the new name lacks
    /// one. The blob object is renamed first; the record is only updated
    /// once the delegate confirmed.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }

        let file = self.owned_file(ctx, file_id).await?;
        let final_name = apply_extension(&file.name, name);

        let key = self.blob.key_for_url(&file.url)?;
        let new_url = self.blob.rename(&key, &final_name).await?;

        let file = self.file_repo.rename(file_id, &final_name, &new_url).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, new_name = %final_name, "File renamed");
        Ok(file)
    }

    /// Deletes a file: blob first, record second. A failed blob delete
    /// aborts with the record intact.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.owned_file(ctx, file_id).await?;

        let key = self.blob.key_for_url(&file.url)?;
        self.blob.delete(std::slice::from_ref(&key)).await?;

        self.file_repo.delete(file_id).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "File deleted");
        Ok(())
    }
}

/// Carry the original extension over to a new name that has none.
///
/// "report.pdf" renamed to "summary" becomes "summary.pdf"; an explicit
/// extension in the new name is respected.
fn apply_extension(original: &str, renamed: &str) -> String {
    if has_extension(renamed) {
        return renamed.to_string();
    }
    match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{renamed}.{ext}")
        }
        _ => renamed.to_string(),
    }
}

fn has_extension(name: &str) -> bool {
    matches!(name.rsplit_once('.'), Some((stem, ext)) if !stem.is_empty() && !ext.is_empty())
}
