//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success envelope for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true for successful responses.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Share link creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// The opaque share token.
    pub token: String,
    /// Server-relative share path (`/s/<token>`).
    pub path: String,
}

/// Anonymous share metadata. Deliberately excludes the blob URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFileResponse {
    /// File name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
}

/// Upload authorization grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadGrantResponse {
    /// The authorized destination folder.
    pub folder_id: uuid::Uuid,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size_bytes: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
}

/// Reorder outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    /// Number of items whose position actually changed.
    pub moved: u64,
}
