//! Sibling-item kinds shared by reorder operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which table a sibling item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A file row.
    File,
    /// A folder row.
    Folder,
}

/// A single drag-reorder position update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderItem {
    /// The item to move.
    pub id: Uuid,
    /// Whether the id refers to a file or a folder.
    pub kind: ItemKind,
    /// The new sibling position.
    pub new_position: i64,
}
