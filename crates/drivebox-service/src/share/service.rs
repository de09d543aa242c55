//! Share link issuance and revocation.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_entity::share::{CreateShare, Share};

use crate::context::RequestContext;
use crate::share::link::LinkService;

/// Manages share creation, listing, and revocation.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// File repository (ownership checks).
    file_repo: Arc<FileRepository>,
    /// Token generator.
    link: Arc<LinkService>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        link: Arc<LinkService>,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            link,
        }
    }

    async fn require_file_owner(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.owner_id != ctx.user_id {
            return Err(AppError::forbidden("File belongs to another user"));
        }
        Ok(())
    }

    /// Creates a share link for a file, or returns the existing one.
    ///
    /// Idempotent per (file, owner): two consecutive calls hand back the
    /// same token rather than minting a duplicate row.
    pub async fn create_link(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<Share> {
        self.require_file_owner(ctx, file_id).await?;

        let existing = self
            .share_repo
            .find_by_file_and_owner(file_id, &ctx.user_id)
            .await?;
        if let Some(share) = existing.into_iter().next() {
            return Ok(share);
        }

        let share = self
            .share_repo
            .insert(&CreateShare {
                file_id,
                owner_id: ctx.user_id.clone(),
                token: self.link.generate_token(),
            })
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, share_id = %share.id, "Share link created");
        Ok(share)
    }

    /// Revokes every share row for a file, duplicates from past races
    /// included.
    pub async fn revoke_link(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        self.require_file_owner(ctx, file_id).await?;

        let removed = self
            .share_repo
            .delete_by_file_and_owner(file_id, &ctx.user_id)
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, removed, "Share links revoked");
        Ok(())
    }

    /// All shares the caller has created (used by clients to badge shared
    /// files).
    pub async fn list_for_user(&self, ctx: &RequestContext) -> AppResult<Vec<Share>> {
        self.share_repo.find_by_owner(&ctx.user_id).await
    }
}
