//! # drivebox-storage
//!
//! Blob store implementations for Drivebox: an HTTP object-store client
//! and a local filesystem provider for development and tests. Both
//! implement the [`BlobStore`] trait from `drivebox-core`.
//!
//! [`BlobStore`]: drivebox_core::traits::BlobStore

pub mod providers;

pub use providers::from_config;
pub use providers::local::LocalBlobStore;
pub use providers::remote::RemoteBlobStore;
