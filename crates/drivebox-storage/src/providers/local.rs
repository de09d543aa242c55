//! Local filesystem blob store.
//!
//! Development and test provider. Blobs are written under a root
//! directory keyed by a random identifier, with a small `.meta` sidecar
//! carrying the display name so renames have something to act on.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::debug;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::{BlobStore, ByteStream, StoredBlob};

/// Sidecar metadata stored next to each blob.
#[derive(Debug, Serialize, Deserialize)]
struct BlobMeta {
    name: String,
}

/// Blob store backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalBlobStore {
    /// Create a local blob store, creating the root directory if needed.
    pub async fn new(root_path: impl AsRef<Path>, url_prefix: &str) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            url_prefix: url_prefix.to_string(),
        })
    }

    fn blob_path(&self, key: &str) -> AppResult<PathBuf> {
        // Keys are generated hex identifiers; anything else is rejected so
        // a crafted URL cannot escape the root directory.
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::validation(format!("Invalid blob key '{key}'")));
        }
        Ok(self.root.join(key))
    }

    fn meta_path(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self.blob_path(key)?.with_extension("meta"))
    }

    async fn write_meta(&self, key: &str, name: &str) -> AppResult<()> {
        let meta = BlobMeta {
            name: name.to_string(),
        };
        tokio::fs::write(self.meta_path(key)?, serde_json::to_vec(&meta)?).await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    async fn store(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        let key = Uuid::new_v4().simple().to_string();
        tokio::fs::write(self.blob_path(&key)?, &data).await?;
        self.write_meta(&key, name).await?;

        debug!(key = %key, name = %name, size = data.len(), "Blob stored locally");
        Ok(StoredBlob {
            url: format!("{}{key}", self.url_prefix),
            key,
        })
    }

    async fn fetch(&self, key: &str) -> AppResult<ByteStream> {
        let path = self.blob_path(key)?;
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::not_found(format!("Blob {key} not found")));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn delete(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            // Absent blobs are fine: a re-run of a partially-completed
            // cascade deletes some keys twice.
            match tokio::fs::remove_file(self.blob_path(key)?).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            let _ = tokio::fs::remove_file(self.meta_path(key)?).await;
        }
        debug!(count = keys.len(), "Blobs deleted locally");
        Ok(())
    }

    async fn rename(&self, key: &str, new_name: &str) -> AppResult<String> {
        if !tokio::fs::try_exists(self.blob_path(key)?).await? {
            return Err(AppError::not_found(format!("Blob {key} not found")));
        }
        self.write_meta(key, new_name).await?;
        Ok(format!("{}{key}", self.url_prefix))
    }
}
