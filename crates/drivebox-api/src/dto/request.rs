//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use drivebox_entity::item::ReorderItem;

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Uuid,
}

/// Rename request body (folders and files).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Batch reorder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    /// Position updates, applied in order.
    pub items: Vec<ReorderItem>,
}

/// Upload authorization request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAuthorizeRequest {
    /// Destination folder.
    pub folder_id: Uuid,
}

/// Upload-completion callback body, as sent by the blob store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadCallbackRequest {
    /// File name as uploaded.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Public URL of the stored blob.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
    /// Destination folder.
    pub parent_id: Uuid,
    /// The authorized uploader.
    #[validate(length(min = 1, message = "Owner is required"))]
    pub owner_id: String,
}
