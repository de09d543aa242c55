//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::file::{CreateFile, File};

/// Repository for file CRUD, sibling-order, and size queries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List files in a folder in sibling order.
    pub async fn find_by_folder(&self, parent_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE parent_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Sum file sizes grouped by parent for a whole set of folders in one
    /// query (one round trip per tree level during size aggregation).
    pub async fn sum_sizes_by_parents(
        &self,
        parent_ids: &[Uuid],
        owner_id: &str,
    ) -> AppResult<Vec<(Uuid, i64)>> {
        sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT parent_id, COALESCE(SUM(size_bytes), 0)::BIGINT \
             FROM files WHERE parent_id = ANY($1) AND owner_id = $2 \
             GROUP BY parent_id",
        )
        .bind(parent_ids)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum file sizes", e))
    }

    /// The highest sibling position under a parent, or 0 when empty.
    pub async fn max_position(&self, parent_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(position), 0) FROM files WHERE parent_id = $1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read max position", e))
    }

    /// Create a new file record.
    pub async fn insert(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (owner_id, name, size_bytes, url, position, parent_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.owner_id)
        .bind(&data.name)
        .bind(data.size_bytes)
        .bind(&data.url)
        .bind(data.position)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Rename a file, updating both display name and blob URL. Called only
    /// after the blob delegate confirmed its side of the rename.
    pub async fn rename(&self, file_id: Uuid, new_name: &str, new_url: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, url = $3 WHERE id = $1 RETURNING *",
        )
        .bind(file_id)
        .bind(new_name)
        .bind(new_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Update a file's sibling position, scoped to the owner.
    ///
    /// Returns the number of rows touched; zero means the file vanished
    /// (or belongs to someone else) and the update was a no-op.
    pub async fn update_position(
        &self,
        file_id: Uuid,
        owner_id: &str,
        position: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query("UPDATE files SET position = $3 WHERE id = $1 AND owner_id = $2")
            .bind(file_id)
            .bind(owner_id)
            .bind(position)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update file position", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete a single file record. Deleting an already-deleted id affects
    /// zero rows and is not an error, so cascade retries are safe.
    pub async fn delete(&self, file_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected())
    }

    /// Delete every file record directly under a folder (one statement per
    /// cascade level, after the level's blobs are gone).
    pub async fn delete_by_parent(&self, parent_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE parent_id = $1")
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder files", e)
            })?;
        Ok(result.rows_affected())
    }
}
