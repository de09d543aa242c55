//! Blob store providers.

pub mod local;
pub mod remote;

use std::sync::Arc;

use drivebox_core::config::blob::BlobConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::BlobStore;

/// Construct the configured blob store provider.
pub async fn from_config(config: &BlobConfig) -> AppResult<Arc<dyn BlobStore>> {
    match config.provider.as_str() {
        "remote" => Ok(Arc::new(remote::RemoteBlobStore::new(
            &config.remote,
            &config.public_url_prefix,
        )?)),
        "local" => Ok(Arc::new(
            local::LocalBlobStore::new(&config.local.root_path, &config.public_url_prefix).await?,
        )),
        other => Err(AppError::configuration(format!(
            "Unknown blob provider '{other}'"
        ))),
    }
}
