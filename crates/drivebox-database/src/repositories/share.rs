//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::share::{CreateShare, Share};

/// Repository for share-link rows.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM file_shares WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// All share rows for a (file, owner) pair. More than one row can
    /// exist after a create race; callers treat the first as canonical.
    pub async fn find_by_file_and_owner(
        &self,
        file_id: Uuid,
        owner_id: &str,
    ) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM file_shares WHERE file_id = $1 AND owner_id = $2 \
             ORDER BY created_at ASC",
        )
        .bind(file_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file shares", e))
    }

    /// All shares created by an owner.
    pub async fn find_by_owner(&self, owner_id: &str) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM file_shares WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// Create a new share row.
    pub async fn insert(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO file_shares (file_id, owner_id, token) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.file_id)
        .bind(&data.owner_id)
        .bind(&data.token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    /// Delete every share row for a (file, owner) pair, duplicates
    /// included. Returns the number of rows removed.
    pub async fn delete_by_file_and_owner(
        &self,
        file_id: Uuid,
        owner_id: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM file_shares WHERE file_id = $1 AND owner_id = $2")
            .bind(file_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete shares", e)
            })?;
        Ok(result.rows_affected())
    }
}
