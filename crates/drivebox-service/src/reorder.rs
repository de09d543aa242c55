//! Drag-reorder of sibling items.

use std::sync::Arc;

use tracing::{info, warn};

use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::item::{ItemKind, ReorderItem};

use crate::context::RequestContext;

/// Applies batches of sibling position updates.
#[derive(Debug, Clone)]
pub struct ReorderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
}

impl ReorderService {
    /// Creates a new reorder service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Update each item's position, scoped to rows the caller owns.
    ///
    /// Updates are independent: there is no cross-item invariant, and
    /// duplicate positions are tolerated (reads tie-break on id). A
    /// failure partway leaves the earlier updates applied — the caller is
    /// expected to re-fetch the listing to reconcile. An item that
    /// matches no owned row (deleted concurrently, or not the caller's)
    /// is skipped, which is how the reorder/delete race resolves.
    ///
    /// Returns the number of rows actually moved.
    pub async fn reorder_items(
        &self,
        ctx: &RequestContext,
        items: &[ReorderItem],
    ) -> AppResult<u64> {
        let mut moved = 0u64;

        for item in items {
            let touched = match item.kind {
                ItemKind::File => {
                    self.file_repo
                        .update_position(item.id, &ctx.user_id, item.new_position)
                        .await?
                }
                ItemKind::Folder => {
                    self.folder_repo
                        .update_position(item.id, &ctx.user_id, item.new_position)
                        .await?
                }
            };

            if touched == 0 {
                warn!(user_id = %ctx.user_id, item_id = %item.id, "Reorder skipped missing item");
            }
            moved += touched;
        }

        info!(user_id = %ctx.user_id, requested = items.len(), moved, "Items reordered");
        Ok(moved)
    }
}
