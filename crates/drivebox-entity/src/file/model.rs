//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file stored in Drivebox. The bytes live in the external blob store;
/// this record only holds the locator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file owner.
    pub owner_id: String,
    /// The file name (including extension).
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Public URL of the stored blob.
    pub url: String,
    /// Sibling sort position; ties broken by `id`.
    pub position: i64,
    /// The folder containing this file.
    pub parent_id: Uuid,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file owner.
    pub owner_id: String,
    /// The file name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Public URL of the stored blob.
    pub url: String,
    /// Sibling sort position.
    pub position: i64,
    /// The folder to place the file in.
    pub parent_id: Uuid,
}
