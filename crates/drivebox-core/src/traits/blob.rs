//! Blob store trait — the delegate that owns file bytes.
//!
//! The tree store only ever holds a URL referencing an externally stored
//! blob; all byte-level side effects go through this trait.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::error::AppError;
use crate::result::AppResult;

/// Result of storing a blob: the external key and the public URL derived
/// from it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredBlob {
    /// The object store's identifier for the stored bytes.
    pub key: String,
    /// The user-facing URL (`<url_prefix><key>`).
    pub url: String,
}

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for the external object store holding file bytes.
///
/// Implementations exist for an HTTP object-store API and for the local
/// filesystem (development and tests). All calls are blocking I/O from the
/// engine's perspective: a dependent record mutation must not proceed until
/// the blob call has returned.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "remote", "local").
    fn provider_type(&self) -> &str;

    /// The public URL prefix under which blobs are reachable.
    fn url_prefix(&self) -> &str;

    /// Store a blob and return its key and public URL.
    async fn store(&self, name: &str, data: Bytes) -> AppResult<StoredBlob>;

    /// Read a blob's bytes as a stream.
    async fn fetch(&self, key: &str) -> AppResult<ByteStream>;

    /// Delete a batch of blobs. Deleting an already-absent key is a no-op,
    /// so a partially-completed cascade can be re-run safely.
    async fn delete(&self, keys: &[String]) -> AppResult<()>;

    /// Rename the object behind `key` and return its (possibly unchanged)
    /// public URL.
    async fn rename(&self, key: &str, new_name: &str) -> AppResult<String>;

    /// Derive the blob key from a stored URL by stripping the public
    /// prefix.
    fn key_for_url(&self, url: &str) -> AppResult<String> {
        url.strip_prefix(self.url_prefix())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::validation(format!("URL '{url}' does not belong to this blob store"))
            })
    }
}
