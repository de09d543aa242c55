//! Anonymous share resolution and download.
//!
//! Token possession is the whole authorization: no caller identity is
//! involved, and the blob URL is never handed to the anonymous caller —
//! bytes are streamed server-side through the blob delegate.

use std::sync::Arc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::{BlobStore, ByteStream};
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_entity::file::File;
use drivebox_entity::share::Share;

/// Resolves share tokens to files for unauthenticated retrieval.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob delegate for server-side streaming.
    blob: Arc<dyn BlobStore>,
}

/// A resolved share download: file metadata plus the byte stream.
pub struct SharedDownload {
    /// The shared file's record.
    pub file: File,
    /// The blob's bytes.
    pub stream: ByteStream,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        blob: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            blob,
        }
    }

    /// Look up a share token and the file it references.
    ///
    /// A missing share and a share pointing at a deleted file are both a
    /// plain `NotFound` — the anonymous caller learns nothing else.
    pub async fn resolve(&self, token: &str) -> AppResult<(Share, File)> {
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        let file = self
            .file_repo
            .find_by_id(share.file_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        Ok((share, file))
    }

    /// Resolve a token and open the underlying blob for streaming.
    pub async fn download(&self, token: &str) -> AppResult<SharedDownload> {
        let (_, file) = self.resolve(token).await?;

        let key = self.blob.key_for_url(&file.url)?;
        let stream = self.blob.fetch(&key).await?;

        Ok(SharedDownload { file, stream })
    }
}
