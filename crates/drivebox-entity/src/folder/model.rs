//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in the file hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The identity that owns this folder.
    pub owner_id: String,
    /// Folder name. Siblings may share a name.
    pub name: String,
    /// Parent folder ID (null for the owner's single root folder).
    pub parent_id: Option<Uuid>,
    /// Sibling sort position; ties broken by `id`.
    pub position: i64,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: String,
    /// Folder name.
    pub name: String,
    /// Parent folder (None only for the onboarding root).
    pub parent_id: Option<Uuid>,
    /// Sibling sort position.
    pub position: i64,
}

/// A folder together with its recursively aggregated size, as returned by
/// folder listings.
#[derive(Debug, Clone, Serialize)]
pub struct FolderWithSize {
    /// The folder record.
    #[serde(flatten)]
    pub folder: Folder,
    /// Total size in bytes of all descendant files.
    pub size_bytes: i64,
}
