//! Ancestor-chain resolution (breadcrumbs).

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::folder::Folder;

use crate::MAX_TREE_DEPTH;
use crate::context::RequestContext;

/// Walks parent links upward to build breadcrumb trails.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// The chain from the owner's root down to `folder_id`, inclusive.
    ///
    /// Walks `parent_id` links upward until the null-parent root. The
    /// walk keeps a visited set and a depth cutoff; a revisited id or a
    /// parent link pointing at a missing record means the stored tree is
    /// malformed and surfaces as `CorruptTree` instead of looping.
    pub async fn ancestors(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Vec<Folder>> {
        let mut current = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if current.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Folder belongs to another user"));
        }

        let mut chain = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();

        loop {
            if !visited.insert(current.id) {
                return Err(AppError::corrupt_tree(format!(
                    "Cycle detected in folder tree at folder {}",
                    current.id
                )));
            }
            if visited.len() > MAX_TREE_DEPTH {
                return Err(AppError::corrupt_tree(format!(
                    "Ancestor chain longer than {MAX_TREE_DEPTH} levels above folder {folder_id}"
                )));
            }

            let parent_id = current.parent_id;
            chain.push(current);

            match parent_id {
                None => break,
                Some(parent_id) => {
                    current = self.folder_repo.find_by_id(parent_id).await?.ok_or_else(|| {
                        AppError::corrupt_tree(format!(
                            "Folder {parent_id} is referenced as a parent but does not exist"
                        ))
                    })?;
                }
            }
        }

        chain.reverse();
        Ok(chain)
    }
}
