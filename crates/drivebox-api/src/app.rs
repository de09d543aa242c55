//! Application wiring: repositories, services, and shared state.

use std::sync::Arc;

use sqlx::PgPool;

use drivebox_auth::JwtSessionVerifier;
use drivebox_core::config::AppConfig;
use drivebox_core::result::AppResult;
use drivebox_core::traits::{BlobStore, SessionVerifier};
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_service::file::{FileService, UploadService};
use drivebox_service::folder::{FolderService, SizeService, TreeService};
use drivebox_service::reorder::ReorderService;
use drivebox_service::share::{AccessService, LinkService, ShareService};

use crate::state::AppState;

/// Build the full application state from configuration: connect the
/// database and construct the configured blob provider.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let pool = drivebox_database::connection::create_pool(&config.database).await?;
    let blob = drivebox_storage::from_config(&config.blob).await?;
    Ok(assemble_state(config, pool, blob))
}

/// Wire repositories and services around existing infrastructure.
///
/// Split out from [`build_state`] so tests can inject their own pool and
/// blob store.
pub fn assemble_state(config: AppConfig, pool: PgPool, blob: Arc<dyn BlobStore>) -> AppState {
    let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
    let file_repo = Arc::new(FileRepository::new(pool.clone()));
    let share_repo = Arc::new(ShareRepository::new(pool.clone()));

    let session_verifier: Arc<dyn SessionVerifier> =
        Arc::new(JwtSessionVerifier::new(&config.auth));

    let tree = Arc::new(TreeService::new(Arc::clone(&folder_repo)));
    let sizes = Arc::new(SizeService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        Arc::clone(&tree),
        Arc::clone(&sizes),
        Arc::clone(&blob),
    ));
    let file_service = Arc::new(FileService::new(Arc::clone(&file_repo), Arc::clone(&blob)));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        Arc::clone(&blob),
    ));
    let link = Arc::new(LinkService::new());
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&file_repo),
        link,
    ));
    let access_service = Arc::new(AccessService::new(
        Arc::clone(&share_repo),
        Arc::clone(&file_repo),
        Arc::clone(&blob),
    ));
    let reorder_service = Arc::new(ReorderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
    ));

    AppState {
        config: Arc::new(config),
        db_pool: pool,
        blob,
        session_verifier,
        folder_service,
        file_service,
        upload_service,
        share_service,
        access_service,
        reorder_service,
    }
}
