//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An anonymous share link granting read access to one file.
///
/// Possession of the token is the whole authorization; the owner id is a
/// cache of the file's owner used when revoking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// The file's owner at share-creation time.
    pub owner_id: String,
    /// Opaque, unguessable token.
    pub token: String,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// The file being shared.
    pub file_id: Uuid,
    /// The file's owner.
    pub owner_id: String,
    /// Opaque token.
    pub token: String,
}
