//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD and sibling-order queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find the root folder for an owner (the single folder with a null
    /// parent).
    pub async fn find_root(&self, owner_id: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL \
             ORDER BY created_at ASC LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    /// List direct child folders in sibling order.
    pub async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    /// List the direct child folders of a whole set of parents in one
    /// query (one round trip per tree level during size aggregation).
    pub async fn find_children_of_many(
        &self,
        parent_ids: &[Uuid],
        owner_id: &str,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = ANY($1) AND owner_id = $2",
        )
        .bind(parent_ids)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list child folders", e)
        })
    }

    /// The highest sibling position under a parent, or 0 when empty.
    pub async fn max_position(&self, parent_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(position), 0) FROM folders WHERE parent_id = $1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read max position", e))
    }

    /// Create a new folder.
    pub async fn insert(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (owner_id, name, parent_id, position) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.owner_id)
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// Rename a folder.
    pub async fn rename(&self, folder_id: Uuid, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>("UPDATE folders SET name = $2 WHERE id = $1 RETURNING *")
            .bind(folder_id)
            .bind(new_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Update a folder's sibling position, scoped to the owner.
    ///
    /// Returns the number of rows touched; zero means the folder vanished
    /// (or belongs to someone else) and the update was a no-op.
    pub async fn update_position(
        &self,
        folder_id: Uuid,
        owner_id: &str,
        position: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE folders SET position = $3 WHERE id = $1 AND owner_id = $2")
            .bind(folder_id)
            .bind(owner_id)
            .bind(position)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update folder position", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete a single folder record. Deleting an already-deleted id
    /// affects zero rows and is not an error, so cascade retries are safe.
    pub async fn delete(&self, folder_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected())
    }
}
