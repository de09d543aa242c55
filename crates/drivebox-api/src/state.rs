//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use drivebox_core::config::AppConfig;
use drivebox_core::traits::{BlobStore, SessionVerifier};
use drivebox_service::file::{FileService, UploadService};
use drivebox_service::folder::FolderService;
use drivebox_service::reorder::ReorderService;
use drivebox_service::share::{AccessService, ShareService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Blob delegate.
    pub blob: Arc<dyn BlobStore>,
    /// Identity gate.
    pub session_verifier: Arc<dyn SessionVerifier>,
    /// Folder operations.
    pub folder_service: Arc<FolderService>,
    /// File operations.
    pub file_service: Arc<FileService>,
    /// Upload authorization and completion.
    pub upload_service: Arc<UploadService>,
    /// Share issuance and revocation.
    pub share_service: Arc<ShareService>,
    /// Anonymous share resolution.
    pub access_service: Arc<AccessService>,
    /// Sibling reordering.
    pub reorder_service: Arc<ReorderService>,
}
