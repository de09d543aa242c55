//! Folder operations: creation, rename, cascading delete, onboarding,
//! and listings.

use std::sync::Arc;

use futures::future::{self, BoxFuture};
use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::BlobStore;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::file::File;
use drivebox_entity::folder::{CreateFolder, Folder, FolderWithSize};

use crate::MAX_TREE_DEPTH;
use crate::context::RequestContext;
use crate::folder::size::SizeService;
use crate::folder::tree::TreeService;

/// Default folders created for every new drive, in sibling order after
/// the root.
const ONBOARDING_FOLDERS: [&str; 3] = ["Trash", "Shared", "Documents"];

/// Manages folder operations and owns cascading-delete semantics.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository (cascade and listings).
    file_repo: Arc<FileRepository>,
    /// Ancestor-walk service (breadcrumbs).
    tree: Arc<TreeService>,
    /// Recursive size aggregation.
    sizes: Arc<SizeService>,
    /// Blob delegate for cascading byte deletion.
    blob: Arc<dyn BlobStore>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Uuid,
}

/// A folder listing: breadcrumb trail plus ordered children.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FolderContents {
    /// Ancestor chain from the root to the listed folder, inclusive.
    pub breadcrumbs: Vec<Folder>,
    /// Child folders in `(position, id)` order, each with its recursive
    /// size.
    pub folders: Vec<FolderWithSize>,
    /// Child files in `(position, id)` order.
    pub files: Vec<File>,
}

/// Counts of records removed by a cascading delete.
#[derive(Debug, Default, Clone, Copy)]
struct DeleteStats {
    folders: u64,
    files: u64,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        tree: Arc<TreeService>,
        sizes: Arc<SizeService>,
        blob: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            tree,
            sizes,
            blob,
        }
    }

    /// Fetch a folder and verify the caller owns it.
    pub async fn owned_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
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

    /// The caller's root folder, if the drive has been set up.
    pub async fn get_root(&self, ctx: &RequestContext) -> AppResult<Option<Folder>> {
        self.folder_repo.find_root(&ctx.user_id).await
    }

    /// Set up a new drive: a root folder plus the default children.
    ///
    /// Guarded against double invocation — a second call finds the
    /// existing root and fails with `Conflict`, preserving the
    /// one-root-per-owner invariant.
    pub async fn onboard_user(&self, ctx: &RequestContext) -> AppResult<Folder> {
        if self.folder_repo.find_root(&ctx.user_id).await?.is_some() {
            return Err(AppError::conflict("Drive already initialized"));
        }

        let root = self
            .folder_repo
            .insert(&CreateFolder {
                owner_id: ctx.user_id.clone(),
                name: "Root".to_string(),
                parent_id: None,
                position: 0,
            })
            .await?;

        for (i, name) in ONBOARDING_FOLDERS.iter().enumerate() {
            self.folder_repo
                .insert(&CreateFolder {
                    owner_id: ctx.user_id.clone(),
                    name: (*name).to_string(),
                    parent_id: Some(root.id),
                    position: (i + 1) as i64,
                })
                .await?;
        }

        info!(user_id = %ctx.user_id, root_id = %root.id, "Drive onboarded");
        Ok(root)
    }

    /// Creates a new folder as the last sibling under its parent.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        // The parent must exist and belong to the caller before anything
        // is inserted under it.
        self.owned_folder(ctx, req.parent_id).await?;

        let position = self.folder_repo.max_position(req.parent_id).await? + 1;
        let folder = self
            .folder_repo
            .insert(&CreateFolder {
                owner_id: ctx.user_id.clone(),
                name: name.to_string(),
                parent_id: Some(req.parent_id),
                position,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = %req.parent_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        self.owned_folder(ctx, folder_id).await?;
        let folder = self.folder_repo.rename(folder_id, name).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, new_name = %name, "Folder renamed");
        Ok(folder)
    }

    /// Deletes a folder and everything beneath it.
    ///
    /// Depth-first: each folder level deletes its files' blobs in one
    /// batched delegate call, then the file records, then recurses into
    /// sibling sub-folders in parallel, and removes its own record last.
    /// The walk is not transactional — a failure partway leaves the
    /// remaining subtree intact, and re-running the same delete finishes
    /// the job (every step is idempotent).
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<()> {
        let folder = self.owned_folder(ctx, folder_id).await?;

        let stats = self.delete_recursive(folder.id, 0).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            folders = stats.folders,
            files = stats.files,
            "Folder deleted"
        );
        Ok(())
    }

    fn delete_recursive(
        &self,
        folder_id: Uuid,
        depth: usize,
    ) -> BoxFuture<'_, AppResult<DeleteStats>> {
        Box::pin(async move {
            if depth > MAX_TREE_DEPTH {
                return Err(AppError::corrupt_tree(format!(
                    "Delete aborted: tree deeper than {MAX_TREE_DEPTH} levels at folder {folder_id}"
                )));
            }

            let mut stats = DeleteStats::default();

            let files = self.file_repo.find_by_folder(folder_id).await?;
            if !files.is_empty() {
                let keys = files
                    .iter()
                    .map(|file| self.blob.key_for_url(&file.url))
                    .collect::<AppResult<Vec<_>>>()?;
                self.blob.delete(&keys).await?;
                stats.files += self.file_repo.delete_by_parent(folder_id).await?;
            }

            let children = self.folder_repo.find_children(folder_id).await?;
            let child_stats = future::try_join_all(
                children
                    .iter()
                    .map(|child| self.delete_recursive(child.id, depth + 1)),
            )
            .await?;
            for child in child_stats {
                stats.folders += child.folders;
                stats.files += child.files;
            }

            self.folder_repo.delete(folder_id).await?;
            stats.folders += 1;
            Ok(stats)
        })
    }

    /// Lists a folder: breadcrumbs, sized child folders, and child files,
    /// both child lists in sibling order.
    pub async fn list_contents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderContents> {
        self.owned_folder(ctx, folder_id).await?;

        let breadcrumbs = self.tree.ancestors(ctx, folder_id).await?;
        let folders = self.folder_repo.find_children(folder_id).await?;
        let files = self.file_repo.find_by_folder(folder_id).await?;

        let folder_ids: Vec<Uuid> = folders.iter().map(|f| f.id).collect();
        let mut size_map = self
            .sizes
            .sizes_for_folders(&ctx.user_id, &folder_ids)
            .await?;

        let folders = folders
            .into_iter()
            .map(|folder| {
                let size_bytes = size_map.remove(&folder.id).unwrap_or(0);
                FolderWithSize { folder, size_bytes }
            })
            .collect();

        Ok(FolderContents {
            breadcrumbs,
            folders,
            files,
        })
    }
}
