//! Blob store (external object store) configuration.

use serde::{Deserialize, Serialize};

/// Top-level blob store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Which provider to use: "remote" or "local".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Public URL prefix under which stored blobs are reachable. File
    /// records store `<prefix><key>` as their URL; stripping the prefix
    /// recovers the blob key.
    #[serde(default = "default_url_prefix")]
    pub public_url_prefix: String,
    /// Shared secret the blob store presents on upload-completion
    /// callbacks (`x-callback-token` header).
    #[serde(default)]
    pub callback_token: String,
    /// Maximum accepted upload size in bytes (default 1 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Remote HTTP object-store configuration.
    #[serde(default)]
    pub remote: RemoteBlobConfig,
    /// Local filesystem blob-store configuration.
    #[serde(default)]
    pub local: LocalBlobConfig,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            public_url_prefix: default_url_prefix(),
            callback_token: String::new(),
            max_upload_size_bytes: default_max_upload(),
            remote: RemoteBlobConfig::default(),
            local: LocalBlobConfig::default(),
        }
    }
}

/// Remote HTTP object-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteBlobConfig {
    /// Base URL of the object-store management API.
    #[serde(default)]
    pub api_url: String,
    /// API key sent as `x-api-key` on every management call.
    #[serde(default)]
    pub api_key: String,
}

/// Local filesystem blob-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalBlobConfig {
    /// Root directory for locally stored blobs.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalBlobConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_url_prefix() -> String {
    "http://localhost:8080/blobs/".to_string()
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}
