//! Recursive folder size aggregation.
//!
//! Sizes are recomputed on every listing read — nothing is cached across
//! requests. The walk is batched per tree level: one `SUM … GROUP BY`
//! file query and one children query per depth, regardless of fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;

use crate::MAX_TREE_DEPTH;

/// Computes recursive folder sizes on read.
#[derive(Debug, Clone)]
pub struct SizeService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
}

impl SizeService {
    /// Creates a new size service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Total size in bytes of all files anywhere beneath `folder_id`.
    pub async fn folder_size_recursively(
        &self,
        owner_id: &str,
        folder_id: Uuid,
    ) -> AppResult<i64> {
        let sizes = self.sizes_for_folders(owner_id, &[folder_id]).await?;
        Ok(sizes.get(&folder_id).copied().unwrap_or(0))
    }

    /// Recursive sizes for a whole set of folders at once (one listing's
    /// worth of siblings), attributing every descendant file's size to
    /// the top-level folder it descends from.
    pub async fn sizes_for_folders(
        &self,
        owner_id: &str,
        folder_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, i64>> {
        let mut totals: HashMap<Uuid, i64> = folder_ids.iter().map(|id| (*id, 0)).collect();
        if folder_ids.is_empty() {
            return Ok(totals);
        }

        // Maps each folder on the current level to the top-level folder
        // its subtree belongs to.
        let mut level: HashMap<Uuid, Uuid> = folder_ids.iter().map(|id| (*id, *id)).collect();
        let mut depth = 0usize;

        while !level.is_empty() {
            depth += 1;
            if depth > MAX_TREE_DEPTH {
                return Err(AppError::corrupt_tree(format!(
                    "Size aggregation aborted: tree deeper than {MAX_TREE_DEPTH} levels"
                )));
            }

            let ids: Vec<Uuid> = level.keys().copied().collect();

            for (parent_id, sum) in self.file_repo.sum_sizes_by_parents(&ids, owner_id).await? {
                if let Some(top) = level.get(&parent_id) {
                    if let Some(total) = totals.get_mut(top) {
                        *total += sum;
                    }
                }
            }

            let children = self
                .folder_repo
                .find_children_of_many(&ids, owner_id)
                .await?;
            let mut next = HashMap::with_capacity(children.len());
            for child in children {
                let Some(parent_id) = child.parent_id else {
                    continue;
                };
                if let Some(top) = level.get(&parent_id) {
                    next.insert(child.id, *top);
                }
            }
            level = next;
        }

        Ok(totals)
    }
}
