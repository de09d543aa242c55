//! HTTP object-store client.
//!
//! Talks to the external blob service that actually holds file bytes.
//! Blobs are keyed by server-generated identifiers; the public download
//! URL is `<public_url_prefix><key>`.

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use tracing::debug;
use uuid::Uuid;

use drivebox_core::config::blob::RemoteBlobConfig;
use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::traits::{BlobStore, ByteStream, StoredBlob};

/// Blob store backed by an HTTP object-store API.
#[derive(Debug, Clone)]
pub struct RemoteBlobStore {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    url_prefix: String,
}

impl RemoteBlobStore {
    /// Create a new remote blob store client.
    pub fn new(config: &RemoteBlobConfig, url_prefix: &str) -> AppResult<Self> {
        if config.api_url.is_empty() {
            return Err(AppError::configuration(
                "blob.remote.api_url is required for the remote provider",
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            url_prefix: url_prefix.to_string(),
        })
    }

    fn check_status(op: &str, status: reqwest::StatusCode) -> AppResult<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::upstream(format!(
                "Blob store {op} failed with status {status}"
            )))
        }
    }
}

#[async_trait]
impl BlobStore for RemoteBlobStore {
    fn provider_type(&self) -> &str {
        "remote"
    }

    fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    async fn store(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        let key = Uuid::new_v4().simple().to_string();
        let response = self
            .client
            .put(format!("{}/blobs/{key}", self.api_url))
            .header("x-api-key", &self.api_key)
            .query(&[("name", name)])
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::with_source(
                ErrorKind::Upstream,
                format!("Blob store upload failed: {e}"),
                e,
            ))?;
        Self::check_status("upload", response.status())?;

        debug!(key = %key, name = %name, "Blob stored");
        Ok(StoredBlob {
            url: format!("{}{key}", self.url_prefix),
            key,
        })
    }

    async fn fetch(&self, key: &str) -> AppResult<ByteStream> {
        let response = self
            .client
            .get(format!("{}{key}", self.url_prefix))
            .send()
            .await
            .map_err(|e| AppError::with_source(
                ErrorKind::Upstream,
                format!("Blob store fetch failed: {e}"),
                e,
            ))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Blob {key} not found")));
        }
        Self::check_status("fetch", response.status())?;

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(stream))
    }

    async fn delete(&self, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let response = self
            .client
            .post(format!("{}/blobs/delete", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "keys": keys }))
            .send()
            .await
            .map_err(|e| AppError::with_source(
                ErrorKind::Upstream,
                format!("Blob store delete failed: {e}"),
                e,
            ))?;
        Self::check_status("delete", response.status())?;

        debug!(count = keys.len(), "Blobs deleted");
        Ok(())
    }

    async fn rename(&self, key: &str, new_name: &str) -> AppResult<String> {
        let response = self
            .client
            .post(format!("{}/blobs/{key}/rename", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(&serde_json::json!({ "name": new_name }))
            .send()
            .await
            .map_err(|e| AppError::with_source(
                ErrorKind::Upstream,
                format!("Blob store rename failed: {e}"),
                e,
            ))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Blob {key} not found")));
        }
        Self::check_status("rename", response.status())?;

        // The key is stable across renames; only the display name changes.
        Ok(format!("{}{key}", self.url_prefix))
    }
}
